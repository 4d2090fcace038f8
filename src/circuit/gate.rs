use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateKind {
    Not,
    And,
    Nand,
    Or,
    Nor,
    Xor,
    Xnor,
}

impl GateKind {
    /// Looks up an operator keyword. `NXOR` is an accepted spelling of `XNOR`.
    pub fn from_keyword(word: &str) -> Option<Self> {
        let kind = match word {
            "NOT" => Self::Not,
            "AND" => Self::And,
            "NAND" => Self::Nand,
            "OR" => Self::Or,
            "NOR" => Self::Nor,
            "XOR" => Self::Xor,
            "XNOR" | "NXOR" => Self::Xnor,
            _ => return None,
        };
        Some(kind)
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Not => "NOT",
            Self::And => "AND",
            Self::Nand => "NAND",
            Self::Or => "OR",
            Self::Nor => "NOR",
            Self::Xor => "XOR",
            Self::Xnor => "XNOR",
        }
    }

    /// Smallest operand count the textual form accepts.
    pub fn min_arity(self) -> usize {
        match self {
            Self::Not => 1,
            _ => 2,
        }
    }

    pub fn max_arity(self) -> Option<usize> {
        match self {
            Self::Not => Some(1),
            _ => None,
        }
    }

    /// Reference semantics used by tests and the exhaustive checkers.
    pub fn eval(self, operands: &[bool]) -> bool {
        let parity = operands.iter().filter(|&&v| v).count() % 2 == 1;
        match self {
            Self::Not => !operands[0],
            Self::And => operands.iter().all(|&v| v),
            Self::Nand => !operands.iter().all(|&v| v),
            Self::Or => operands.iter().any(|&v| v),
            Self::Nor => !operands.iter().any(|&v| v),
            Self::Xor => parity,
            Self::Xnor => !parity,
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A gate with every name resolved to its wire id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gate {
    pub kind: GateKind,
    pub result: u32,
    pub operands: Vec<u32>,
}

impl Gate {
    pub fn new(kind: GateKind, result: u32, operands: Vec<u32>) -> Self {
        Self {
            kind,
            result,
            operands,
        }
    }

    pub fn arity(&self) -> usize {
        self.operands.len()
    }
}
