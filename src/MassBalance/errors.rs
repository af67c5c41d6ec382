use thiserror::Error;

/// errors raised while turning a chemical formula into element counts
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    /// character sequence outside the element/group/digit grammar
    #[error("Unrecognized token '{token}' at position {position} in formula '{formula}'")]
    UnrecognizedToken {
        formula: String,
        token: char,
        position: usize,
    },
    /// parentheses do not resolve back to the root group
    #[error("Unbalanced groups in formula '{formula}'")]
    UnbalancedGroups { formula: String },
    /// symbol accepted by the freeform grammar but absent from the periodic table
    #[error("Unknown element '{symbol}' in formula '{formula}'")]
    UnknownElement { formula: String, symbol: String },
}

impl FormulaError {
    /// the formula that failed to parse
    pub fn formula(&self) -> &str {
        match self {
            FormulaError::UnrecognizedToken { formula, .. }
            | FormulaError::UnbalancedGroups { formula }
            | FormulaError::UnknownElement { formula, .. } => formula,
        }
    }
}
