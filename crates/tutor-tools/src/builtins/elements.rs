//! Element lookup tool - periodic table data for the chemistry specialist
//!
//! The table is static and read-only. Lookups are case-insensitive and
//! ignore surrounding whitespace; the category is derived from group and
//! atomic number with an ordered rule list where the first match wins.

use crate::error::Result;
use crate::outcome::{Listing, ToolFailure, ToolOutcome};
use crate::registry::{Tool, ToolCategory, ToolDefinition, ToolResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;
use std::time::Instant;

/// One row of the element table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementRecord {
    /// Lowercase English name (lookup key)
    pub name: &'static str,
    /// Chemical symbol
    pub symbol: &'static str,
    /// Proton count
    pub atomic_number: u32,
    /// Standard atomic weight in u
    pub atomic_mass: f64,
    /// IUPAC group (1-18)
    pub group: u8,
    /// Period (1-7)
    pub period: u8,
}

const fn element(
    name: &'static str,
    symbol: &'static str,
    atomic_number: u32,
    atomic_mass: f64,
    group: u8,
    period: u8,
) -> ElementRecord {
    ElementRecord {
        name,
        symbol,
        atomic_number,
        atomic_mass,
        group,
        period,
    }
}

/// Every element the tool knows about
pub static ELEMENTS: &[ElementRecord] = &[
    // Period 1
    element("hydrogen", "H", 1, 1.008, 1, 1),
    element("helium", "He", 2, 4.0026, 18, 1),
    // Period 2
    element("lithium", "Li", 3, 6.94, 1, 2),
    element("beryllium", "Be", 4, 9.0122, 2, 2),
    element("boron", "B", 5, 10.811, 13, 2),
    element("carbon", "C", 6, 12.011, 14, 2),
    element("nitrogen", "N", 7, 14.007, 15, 2),
    element("oxygen", "O", 8, 15.999, 16, 2),
    element("fluorine", "F", 9, 18.998, 17, 2),
    element("neon", "Ne", 10, 20.180, 18, 2),
    // Period 3
    element("sodium", "Na", 11, 22.990, 1, 3),
    element("magnesium", "Mg", 12, 24.305, 2, 3),
    element("aluminum", "Al", 13, 26.982, 13, 3),
    element("silicon", "Si", 14, 28.086, 14, 3),
    element("phosphorus", "P", 15, 30.974, 15, 3),
    element("sulfur", "S", 16, 32.065, 16, 3),
    element("chlorine", "Cl", 17, 35.453, 17, 3),
    element("argon", "Ar", 18, 39.948, 18, 3),
    // Period 4
    element("potassium", "K", 19, 39.098, 1, 4),
    element("calcium", "Ca", 20, 40.078, 2, 4),
    element("chromium", "Cr", 24, 51.996, 6, 4),
    element("manganese", "Mn", 25, 54.938, 7, 4),
    element("iron", "Fe", 26, 55.845, 8, 4),
    element("nickel", "Ni", 28, 58.693, 10, 4),
    element("copper", "Cu", 29, 63.546, 11, 4),
    element("zinc", "Zn", 30, 65.38, 12, 4),
    element("bromine", "Br", 35, 79.904, 17, 4),
    // Heavier
    element("silver", "Ag", 47, 107.868, 11, 5),
    element("iodine", "I", 53, 126.904, 17, 5),
    element("tungsten", "W", 74, 183.84, 6, 6),
    element("gold", "Au", 79, 196.967, 11, 6),
    element("lead", "Pb", 82, 207.2, 14, 6),
    element("molybdenum", "Mo", 42, 95.94, 6, 5),
];

static BY_NAME: LazyLock<HashMap<&'static str, &'static ElementRecord>> =
    LazyLock::new(|| ELEMENTS.iter().map(|e| (e.name, e)).collect());

static SORTED_NAMES: LazyLock<Vec<String>> = LazyLock::new(|| {
    let mut names: Vec<String> = ELEMENTS.iter().map(|e| e.name.to_string()).collect();
    names.sort();
    names
});

/// Atomic numbers treated as metalloids (only within groups 13+)
const METALLOIDS: &[u32] = &[5, 14, 32, 33, 51, 52, 84];

/// Derived element classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ElementCategory {
    /// Group 1 except hydrogen
    #[serde(rename = "alkali metal")]
    AlkaliMetal,
    /// Group 2
    #[serde(rename = "alkaline earth metal")]
    AlkalineEarthMetal,
    /// Group 17
    #[serde(rename = "halogen")]
    Halogen,
    /// Group 18
    #[serde(rename = "noble gas")]
    NobleGas,
    /// Groups 3-12
    #[serde(rename = "transition metal")]
    TransitionMetal,
    /// Listed metalloid in groups 13+
    #[serde(rename = "metalloid")]
    Metalloid,
    /// Groups 13+ beyond magnesium
    #[serde(rename = "post-transition metal")]
    PostTransitionMetal,
    /// Everything else
    #[serde(rename = "nonmetal")]
    Nonmetal,
}

impl ElementCategory {
    /// Returns the display label
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AlkaliMetal => "alkali metal",
            Self::AlkalineEarthMetal => "alkaline earth metal",
            Self::Halogen => "halogen",
            Self::NobleGas => "noble gas",
            Self::TransitionMetal => "transition metal",
            Self::Metalloid => "metalloid",
            Self::PostTransitionMetal => "post-transition metal",
            Self::Nonmetal => "nonmetal",
        }
    }

    /// Classify a record. Rules are evaluated in order and the first
    /// matching predicate decides.
    #[must_use]
    pub fn of(record: &ElementRecord) -> Self {
        CATEGORY_RULES
            .iter()
            .find(|(matches, _)| matches(record))
            .map_or(Self::Nonmetal, |(_, category)| *category)
    }
}

impl fmt::Display for ElementCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type CategoryRule = (fn(&ElementRecord) -> bool, ElementCategory);

// Order matters: a metalloid also satisfies the later p-block rules.
// Light p-block elements that are neither metalloids nor halogens/noble
// gases (C, N, O) fall through to nonmetal.
static CATEGORY_RULES: &[CategoryRule] = &[
    (is_alkali, ElementCategory::AlkaliMetal),
    (|e| e.group == 2, ElementCategory::AlkalineEarthMetal),
    (|e| e.group == 17, ElementCategory::Halogen),
    (|e| e.group == 18, ElementCategory::NobleGas),
    (|e| (3..=12).contains(&e.group), ElementCategory::TransitionMetal),
    (is_metalloid, ElementCategory::Metalloid),
    (is_post_transition, ElementCategory::PostTransitionMetal),
];

fn is_alkali(e: &ElementRecord) -> bool {
    e.group == 1 && e.atomic_number > 1
}

fn is_metalloid(e: &ElementRecord) -> bool {
    e.group >= 13 && METALLOIDS.contains(&e.atomic_number)
}

fn is_post_transition(e: &ElementRecord) -> bool {
    e.group >= 13 && e.atomic_number > 12
}

/// Success payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementInfo {
    /// Title-cased query
    pub element: String,
    /// Chemical symbol
    pub symbol: &'static str,
    /// Proton count
    pub atomic_number: u32,
    /// Standard atomic weight in u
    pub atomic_mass: f64,
    /// IUPAC group
    pub group: u8,
    /// Period
    pub period: u8,
    /// Derived classification
    pub category: ElementCategory,
    /// One-line summary
    pub description: String,
}

/// Look up an element by English name
#[must_use]
pub fn lookup(name: &str) -> ToolOutcome<ElementInfo> {
    let trimmed = name.trim();
    let key = trimmed.to_lowercase();

    let Some(record) = BY_NAME.get(key.as_str()) else {
        return ToolFailure::new(format!("Element '{name}' not found in the database."))
            .with_listing(Listing::Elements(SORTED_NAMES.clone()))
            .with_suggestion(
                "Check spelling or try a different element name. \
                 Use full element names like 'carbon' or 'hydrogen'.",
            )
            .into();
    };

    let category = ElementCategory::of(record);
    ToolOutcome::success(ElementInfo {
        element: title_case(trimmed),
        symbol: record.symbol,
        atomic_number: record.atomic_number,
        atomic_mass: record.atomic_mass,
        group: record.group,
        period: record.period,
        category,
        description: describe(record, category),
    })
}

fn describe(record: &ElementRecord, category: ElementCategory) -> String {
    format!(
        "{} ({}) is a {} in group {}, period {}. Atomic mass: {} u",
        title_case(record.name),
        record.symbol,
        category,
        record.group,
        record.period,
        record.atomic_mass
    )
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

#[derive(Debug, Deserialize)]
struct ElementsInput {
    element_name: String,
}

/// Periodic table lookup exposed to the chemistry specialist
pub struct ElementsLookupTool {
    definition: ToolDefinition,
}

impl ElementsLookupTool {
    /// Create a new element lookup tool
    #[must_use]
    pub fn new() -> Self {
        let definition = ToolDefinition::new(
            "elements_lookup",
            "Look up a chemical element by its full English name and return its symbol, \
             atomic number, atomic mass, group, period and category. On an unknown name \
             the response lists every valid element name.",
            ToolCategory::Chemistry,
        )
        .with_parameters(serde_json::json!({
            "type": "object",
            "properties": {
                "element_name": {
                    "type": "string",
                    "description": "Full element name, e.g. 'carbon' or 'gold'"
                }
            },
            "required": ["element_name"]
        }));

        Self { definition }
    }
}

impl Default for ElementsLookupTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Tool for ElementsLookupTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, input: serde_json::Value) -> Result<ToolResult> {
        let start = Instant::now();

        let outcome = match serde_json::from_value::<ElementsInput>(input) {
            Ok(args) => lookup(&args.element_name),
            Err(e) => ToolOutcome::error(format!("Invalid elements_lookup arguments: {e}")),
        };

        Ok(ToolResult::from_outcome(
            &outcome,
            start.elapsed().as_millis() as u64,
        ))
    }
}
