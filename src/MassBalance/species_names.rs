//! Display names of the species AcidWatch models commonly report.
//! Reference: https://pubchem.ncbi.nlm.nih.gov/compound/<compound_id>

pub const FORMULA_TO_NAME: &[(&str, &str)] = &[
    ("Ar", "argon"),
    ("O2", "oxygen"),
    ("H2O", "water"),
    ("H2S", "hydrogen sulfide"),
    ("SO2", "sulfur dioxide"),
    ("NO2", "nitrogen dioxide"),
    ("CH2O2", "formic acid"),
    ("H2", "hydrogen"),
    ("CH3COOH", "acetic acid"),
    ("CH3OH", "methanol"),
    ("CH4", "methane"),
    ("CH3CHO", "acetaldehyde"),
    ("H2CO", "formaldehyde"),
    ("H2SO4", "sulfuric acid"),
    ("S8", "octasulfur"),
    ("H2SO3", "sulfurous acid"),
    ("HNO3", "nitric acid"),
    ("NH3", "ammonia"),
    ("HNO2", "nitrous acid"),
    ("NO", "nitric oxide"),
    ("N2", "nitrogen"),
    ("NOHSO4", "nitrosylsulfuric acid"),
    ("CH3CH2OH", "ethanol"),
    ("CO", "carbon monoxide"),
    ("HOCH2CH2OH", "MEG"),             // 174, C2H6O2
    ("(CH2CH2OH)2O", "DEG"),           // 8117, C4H10O3
    ("HOCH2(CH2CH2O)2CH2OH", "TEG"),   // 8172, C6H14O4
    ("H2NCH2CH2OH", "MEA"),            // 700, C2H7NO
    ("CH3N(C2H4OH)2", "MDEA"),         // 7767, C5H13NO2
    ("(CH2CH2OH)2NH", "DEA"),          // 8113, C4H11NO2
    ("CH3CH3", "ethane"),              // 6324, C2H6
    ("CH3CH2CH3", "propane"),          // 334, C3H8
    ("(CH3)2CHCH3", "i-butane"),       // 6360, C4H10
    ("CH3CH2CH2CH3", "n-butane"),      // 7843, C4H10
    ("CH3(CH2)3CH3", "n-pentane"),     // 8003, C5H12
    ("CH2=CH2", "ethylene"),           // 6325, C2H4
    ("C6H5CH3", "toluene"),            // 1140, C7H8
    ("C6H4(CH3)2", "o-xylene"),        // 7237, C8H10
];

pub fn species_name(formula: &str) -> Option<&'static str> {
    FORMULA_TO_NAME
        .iter()
        .find(|(f, _)| *f == formula)
        .map(|(_, name)| *name)
}
