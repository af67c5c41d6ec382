#[cfg(test)]
mod tests {
    use crate::MassBalance::decomposer::{
        ConcentrationMap, ElementMassMap, MassDecomposer, decompose_masses, parse_formula,
    };
    use crate::MassBalance::errors::FormulaError;
    use crate::MassBalance::formula_tokenizer::AtomGrammar;
    use approx::assert_relative_eq;
    use nalgebra::DVector;

    fn concs(pairs: &[(&str, f64)]) -> ConcentrationMap {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn masses(pairs: &[(&str, f64)]) -> ElementMassMap {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_empty() {
        assert_eq!(decompose_masses(&ConcentrationMap::new()), Ok(ElementMassMap::new()));
    }

    #[test]
    fn test_simple() {
        let result = decompose_masses(&concs(&[("H2O", 1.0), ("NO2", 2.0), ("N2", 3.0)]));
        assert_eq!(result, Ok(masses(&[("H", 2.0), ("N", 8.0), ("O", 5.0)])));
    }

    #[test]
    fn test_organic_chem_repeats_symbols() {
        let result = decompose_masses(&concs(&[("CH3COOH", 1.0)]));
        assert_eq!(result, Ok(masses(&[("C", 2.0), ("H", 4.0), ("O", 2.0)])));
    }

    #[test]
    fn test_group_and_weight() {
        let result = decompose_masses(&concs(&[("CH(CH3)3", 1.0)]));
        assert_eq!(result, Ok(masses(&[("C", 4.0), ("H", 10.0)])));

        let result = decompose_masses(&concs(&[("CH(CH3)3", 1.5)]));
        assert_eq!(result, Ok(masses(&[("C", 6.0), ("H", 15.0)])));
    }

    #[test]
    fn test_nested_groups() {
        let result = decompose_masses(&concs(&[("B(CF(CH)3)2", 1.0)]));
        assert_eq!(
            result,
            Ok(masses(&[("B", 1.0), ("C", 8.0), ("F", 2.0), ("H", 6.0)]))
        );
    }

    #[test]
    fn test_long_count_suffix() {
        let result = parse_formula("C10000000000H2").unwrap();
        assert_eq!(result, masses(&[("C", 1e10), ("H", 2.0)]));
        let result = parse_formula("(CH2)10000000000").unwrap();
        assert_eq!(result, masses(&[("C", 1e10), ("H", 2e10)]));
    }

    #[test]
    fn test_group_without_multiplier() {
        let result = parse_formula("(CH2CH2OH)2O").unwrap();
        assert_eq!(result, masses(&[("C", 4.0), ("H", 10.0), ("O", 3.0)]));
        let result = parse_formula("Na(OH)").unwrap();
        assert_eq!(result, masses(&[("H", 1.0), ("Na", 1.0), ("O", 1.0)]));
    }

    #[test]
    fn test_unbalanced_group() {
        let result = decompose_masses(&concs(&[("CH(CH3", 1.0)]));
        assert_eq!(
            result,
            Err(FormulaError::UnbalancedGroups {
                formula: "CH(CH3".to_string()
            })
        );
        assert_eq!(result.unwrap_err().formula(), "CH(CH3");
    }

    #[test]
    fn test_closing_root_group() {
        let result = parse_formula("H2O)2");
        assert_eq!(
            result,
            Err(FormulaError::UnbalancedGroups {
                formula: "H2O)2".to_string()
            })
        );
    }

    #[test]
    fn test_unrecognized_token() {
        let result = parse_formula("CH2=CH2");
        assert_eq!(
            result,
            Err(FormulaError::UnrecognizedToken {
                formula: "CH2=CH2".to_string(),
                token: '=',
                position: 3,
            })
        );
        assert!(matches!(
            parse_formula("H2 O"),
            Err(FormulaError::UnrecognizedToken { token: ' ', .. })
        ));
    }

    #[test]
    fn test_invented_symbols() {
        assert!(matches!(
            parse_formula("XxO2"),
            Err(FormulaError::UnrecognizedToken { token: 'X', position: 0, .. })
        ));
        let freeform = MassDecomposer::new(AtomGrammar::Freeform);
        assert_eq!(
            freeform.atom_counts("XxO2"),
            Ok(masses(&[("O", 2.0), ("Xx", 1.0)]))
        );
    }

    #[test]
    fn test_malformed_formula_fails_whole_map() {
        let result = decompose_masses(&concs(&[("H2O", 1.0), ("CH(CH3", 1.0)]));
        assert!(result.is_err());
    }

    #[test]
    fn test_accumulate_leaves_accumulator_on_error() {
        let decomposer = MassDecomposer::default();
        let mut acc = masses(&[("H", 2.0)]);
        decomposer.accumulate("H2O", 0.5, &mut acc).unwrap();
        assert_eq!(acc, masses(&[("H", 3.0), ("O", 0.5)]));
        assert!(decomposer.accumulate("H(O", 1.0, &mut acc).is_err());
        assert_eq!(acc, masses(&[("H", 3.0), ("O", 0.5)]));
    }

    #[test]
    fn test_idempotent() {
        let concentrations = concs(&[
            ("SO2", 10e-6),
            ("NO2", 50e-6),
            ("H2S", 30e-6),
            ("H2O", 20e-6),
            ("CH3N(C2H4OH)2", 1.3e-7),
        ]);
        let first = decompose_masses(&concentrations).unwrap();
        let second = decompose_masses(&concentrations).unwrap();
        assert_eq!(first, second);
        assert_eq!(concentrations.len(), 5);
    }

    #[test]
    fn test_deep_nesting() {
        let depth = 2000;
        let formula = format!("{}H{}", "(".repeat(depth), ")".repeat(depth));
        assert_eq!(parse_formula(&formula), Ok(masses(&[("H", 1.0)])));
    }

    #[test]
    fn test_molar_mass() {
        let decomposer = MassDecomposer::default();
        assert_relative_eq!(decomposer.molar_mass("H2O").unwrap(), 18.015, epsilon = 1e-2);
        assert_relative_eq!(decomposer.molar_mass("NaCl").unwrap(), 58.44, epsilon = 1e-2);
        assert_relative_eq!(decomposer.molar_mass("C6H8O6").unwrap(), 176.12, epsilon = 1e-2);
        assert_relative_eq!(decomposer.molar_mass("Ca(NO3)2").unwrap(), 164.09, epsilon = 1e-2);

        let freeform = MassDecomposer::new(AtomGrammar::Freeform);
        assert_eq!(
            freeform.molar_mass("Me2O"),
            Err(FormulaError::UnknownElement {
                formula: "Me2O".to_string(),
                symbol: "Me".to_string()
            })
        );
    }

    #[test]
    fn test_molar_mass_of_vector_of_substances() {
        let decomposer = MassDecomposer::default();
        let expected = [18.015, 58.44, 176.12, 164.09];
        let calculated = decomposer
            .calculate_molar_mass_of_vector_of_subs(&["H2O", "NaCl", "C6H8O6", "Ca(NO3)2"])
            .unwrap();
        for (calc, exp) in calculated.iter().zip(expected) {
            assert_relative_eq!(*calc, exp, epsilon = 1e-2);
        }
    }

    #[test]
    fn test_element_matrix() {
        let decomposer = MassDecomposer::default();
        let (matrix, elements) = decomposer
            .create_elem_composition_matrix(&["H2O", "NaCl", "C3H8", "CH4"])
            .unwrap();
        assert_eq!(matrix.nrows(), 4);
        assert_eq!(matrix.ncols(), 5);
        assert_eq!(elements, vec!["C", "Cl", "H", "Na", "O"]);
        assert_eq!(matrix[(2, 0)], 3.0);
        assert_eq!(matrix[(2, 2)], 8.0);
    }

    #[test]
    fn test_element_matrix_agrees_with_decomposition() {
        let formulas = ["H2O", "NO2", "N2", "HOCH2(CH2CH2O)2CH2OH"];
        let weights = [1.0, 2.0, 3.0, 0.25];
        let decomposer = MassDecomposer::default();
        let (matrix, elements) = decomposer.create_elem_composition_matrix(&formulas).unwrap();
        let totals = matrix.transpose() * DVector::from_row_slice(&weights);

        let concentrations: ConcentrationMap = formulas
            .iter()
            .zip(weights)
            .map(|(f, w)| (f.to_string(), w))
            .collect();
        let decomposed = decompose_masses(&concentrations).unwrap();
        for (j, element) in elements.iter().enumerate() {
            assert_relative_eq!(totals[j], decomposed[element], epsilon = 1e-12);
        }
    }
}
