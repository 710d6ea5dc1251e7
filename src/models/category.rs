#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    Income,
    #[default]
    Expense,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Lenient parse for stored values. Legacy rows may hold NULL or
    /// anything else, which reads as an expense.
    pub fn from_stored(s: Option<&str>) -> Self {
        match s {
            Some("income") => Self::Income,
            _ => Self::Expense,
        }
    }

    /// Strict parse for user input.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" | "+" => Some(Self::Income),
            "expense" | "out" | "-" => Some(Self::Expense),
            _ => None,
        }
    }

    pub fn all() -> &'static [Category] {
        &[Self::Income, Self::Expense]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        };
        f.pad(label)
    }
}
