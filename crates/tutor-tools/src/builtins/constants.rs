//! Physics constant lookup tool
//!
//! Values are CODATA figures keyed by lowercase, underscore-separated names.

use crate::error::Result;
use crate::outcome::{Listing, ToolFailure, ToolOutcome};
use crate::registry::{Tool, ToolCategory, ToolDefinition, ToolResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;
use std::time::Instant;

/// Constant values in table order
pub static CONSTANTS: &[(&str, f64)] = &[
    ("speed_of_light", 299_792_458.0),
    ("planck_constant", 6.626_070_15e-34),
    ("reduced_planck_constant", 1.054_571_817e-34),
    ("gravitational_constant", 6.674_30e-11),
    ("earth_gravity", 9.806_65),
    ("elementary_charge", 1.602_176_634e-19),
    ("vacuum_permittivity", 8.854_187_812_8e-12),
    ("vacuum_permeability", 1.256_637_062_12e-6),
    ("atomic_mass_unit", 1.660_539_066_60e-27),
    ("avogadro_number", 6.022_140_76e23),
    ("boltzmann_constant", 1.380_649e-23),
    ("electron_mass", 9.109_383_701_5e-31),
    ("electron_charge_to_mass", -1.758_820_010_76e11),
    ("proton_mass", 1.672_621_923_69e-27),
    ("gas_constant", 8.314_462_618),
    ("stefan_boltzmann_constant", 5.670_374_419e-8),
    ("fine_structure_constant", 7.297_352_569_3e-3),
];

static DESCRIPTIONS: &[(&str, &str)] = &[
    (
        "speed_of_light",
        "Speed of light in vacuum: 299,792,458 m/s (exact, by definition)",
    ),
    (
        "planck_constant",
        "Planck constant: 6.626 × 10⁻³⁴ J⋅s (exact, by definition)",
    ),
    (
        "reduced_planck_constant",
        "Reduced Planck constant (ℏ): 1.055 × 10⁻³⁴ J⋅s",
    ),
    (
        "gravitational_constant",
        "Gravitational constant (G): 6.674 × 10⁻¹¹ m³⋅kg⁻¹⋅s⁻²",
    ),
    ("earth_gravity", "Standard gravity on Earth: 9.807 m/s²"),
    (
        "elementary_charge",
        "Elementary charge (e): 1.602 × 10⁻¹⁹ C (exact, by definition)",
    ),
    (
        "vacuum_permittivity",
        "Vacuum permittivity (ε₀): 8.854 × 10⁻¹² F/m",
    ),
    (
        "vacuum_permeability",
        "Vacuum permeability (μ₀): 1.257 × 10⁻⁶ H/m",
    ),
    ("atomic_mass_unit", "Atomic mass unit (u): 1.661 × 10⁻²⁷ kg"),
    (
        "avogadro_number",
        "Avogadro constant (Nₐ): 6.022 × 10²³ mol⁻¹ (exact, by definition)",
    ),
    (
        "boltzmann_constant",
        "Boltzmann constant (k): 1.381 × 10⁻²³ J/K (exact, by definition)",
    ),
    ("electron_mass", "Electron rest mass (mₑ): 9.109 × 10⁻³¹ kg"),
    ("proton_mass", "Proton rest mass (mₚ): 1.673 × 10⁻²⁷ kg"),
    (
        "gas_constant",
        "Gas constant (R): 8.314 J⋅mol⁻¹⋅K⁻¹ (exact, by definition)",
    ),
    (
        "stefan_boltzmann_constant",
        "Stefan-Boltzmann constant (σ): 5.670 × 10⁻⁸ W⋅m⁻²⋅K⁻⁴",
    ),
    (
        "fine_structure_constant",
        "Fine structure constant (α): 7.297 × 10⁻³ ≈ 1/137 (dimensionless)",
    ),
];

static VALUES: LazyLock<HashMap<&'static str, f64>> =
    LazyLock::new(|| CONSTANTS.iter().copied().collect());

static INFO: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| DESCRIPTIONS.iter().copied().collect());

/// Success payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstantInfo {
    /// The name exactly as requested
    pub constant_name: String,
    /// SI value
    pub value: f64,
    /// Human-readable description with units
    pub info: String,
}

/// Look up a physical constant by canonical name
#[must_use]
pub fn lookup(name: &str) -> ToolOutcome<ConstantInfo> {
    let key = name.trim().to_lowercase();

    let Some(&value) = VALUES.get(key.as_str()) else {
        let available = CONSTANTS.iter().map(|(k, _)| (*k).to_string()).collect();
        return ToolFailure::new(format!("Constant '{name}' not found."))
            .with_listing(Listing::Constants(available))
            .with_suggestion("Try using underscores in names, e.g., 'speed_of_light' or 'planck_constant'")
            .into();
    };

    let info = INFO
        .get(key.as_str())
        .map_or_else(|| format!("Physical constant: {}", format_value(value)), |s| (*s).to_string());

    ToolOutcome::success(ConstantInfo {
        constant_name: name.to_string(),
        value,
        info,
    })
}

/// Shortest round-trip form; integral values keep a `.0`, exponents are signed and two digits wide
fn format_value(value: f64) -> String {
    let magnitude = value.abs();
    if value == 0.0 || (1e-4..1e16).contains(&magnitude) {
        let plain = format!("{value}");
        if value.fract() == 0.0 {
            format!("{plain}.0")
        } else {
            plain
        }
    } else {
        let sci = format!("{value:e}");
        let Some((mantissa, exponent)) = sci.split_once('e') else {
            return sci;
        };
        let (sign, digits) = match exponent.strip_prefix('-') {
            Some(digits) => ('-', digits),
            None => ('+', exponent),
        };
        format!("{mantissa}e{sign}{digits:0>2}")
    }
}

#[derive(Debug, Deserialize)]
struct ConstantInput {
    constant_name: String,
}

/// Physical constant lookup exposed to the physics specialist
pub struct PhysicsConstantTool {
    definition: ToolDefinition,
}

impl PhysicsConstantTool {
    /// Create a new constant lookup tool
    #[must_use]
    pub fn new() -> Self {
        let definition = ToolDefinition::new(
            "lookup_physics_constant",
            "Look up the SI value of a fundamental physical constant by its \
             underscore-separated name (e.g. 'speed_of_light', 'planck_constant'). \
             On an unknown name the response lists every valid constant name.",
            ToolCategory::Physics,
        )
        .with_parameters(serde_json::json!({
            "type": "object",
            "properties": {
                "constant_name": {
                    "type": "string",
                    "description": "Constant name such as 'gravitational_constant'"
                }
            },
            "required": ["constant_name"]
        }));

        Self { definition }
    }
}

impl Default for PhysicsConstantTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Tool for PhysicsConstantTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, input: serde_json::Value) -> Result<ToolResult> {
        let start = Instant::now();

        let outcome = match serde_json::from_value::<ConstantInput>(input) {
            Ok(args) => lookup(&args.constant_name),
            Err(e) => ToolOutcome::error(format!(
                "Invalid lookup_physics_constant arguments: {e}"
            )),
        };

        Ok(ToolResult::from_outcome(
            &outcome,
            start.elapsed().as_millis() as u64,
        ))
    }
}
