//! Equations panel for the spring simulations
//!
//! Lists the relevant physics equations and variables as plain text.

use std::fmt;

/// An equation with its name and formula
pub struct Equation {
    pub name: &'static str,
    pub formula: &'static str,
    pub description: &'static str,
}

/// Equations and variables under a title, displayed as plain text
pub struct EquationsPanel<'a> {
    pub title: &'a str,
    pub equations: &'a [Equation],
    pub variables: &'a [(&'a str, &'a str)],
}

impl<'a> EquationsPanel<'a> {
    pub fn new(title: &'a str, equations: &'a [Equation], variables: &'a [(&'a str, &'a str)]) -> Self {
        Self {
            title,
            equations,
            variables,
        }
    }
}

impl fmt::Display for EquationsPanel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "=".repeat(self.title.chars().count()))?;

        writeln!(f, "\nEquations")?;
        for eq in self.equations {
            writeln!(f, "  {:<26} {}", eq.name, eq.formula)?;
            writeln!(f, "  {:<26} {}", "", eq.description)?;
        }

        if self.variables.is_empty() {
            return Ok(());
        }
        writeln!(f, "\nVariables")?;
        let width = self.variables.iter().map(|(symbol, _)| symbol.chars().count()).max().unwrap_or(0);
        for (symbol, meaning) in self.variables {
            writeln!(f, "  {:<width$}  {}", symbol, meaning, width = width)?;
        }
        Ok(())
    }
}

// ============================================================================
// Hooke's Law Equations
// ============================================================================

pub const HOOKES_LAW_EQUATIONS: &[Equation] = &[
    Equation {
        name: "Hooke's Law",
        formula: "F = k·x",
        description: "Applied force stretches the spring in proportion to stiffness",
    },
    Equation {
        name: "Spring Force",
        formula: "F_s = -k·x",
        description: "The spring pushes back against the applied force",
    },
    Equation {
        name: "Potential Energy",
        formula: "E = ½k·x²",
        description: "Elastic energy stored in the spring",
    },
];

pub const SYSTEMS_EQUATIONS: &[Equation] = &[
    Equation {
        name: "Series Spring Constant",
        formula: "1/k_eq = 1/k₁ + 1/k₂",
        description: "Springs end to end are softer than either spring",
    },
    Equation {
        name: "Series Force",
        formula: "F = F₁ = F₂",
        description: "The same force acts on every spring in series",
    },
    Equation {
        name: "Parallel Spring Constant",
        formula: "k_eq = k₁ + k₂",
        description: "Springs side by side are stiffer than either spring",
    },
    Equation {
        name: "Parallel Displacement",
        formula: "x = x₁ = x₂",
        description: "Springs in parallel stretch by the same amount",
    },
];

pub const HOOKES_LAW_VARIABLES: &[(&str, &str)] = &[
    ("F", "Applied force (N)"),
    ("F_s", "Spring force (N)"),
    ("k", "Spring constant (N/m)"),
    ("x", "Displacement from equilibrium (m)"),
    ("E", "Potential energy (J)"),
    ("k_eq", "Equivalent spring constant (N/m)"),
];
