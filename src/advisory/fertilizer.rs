//! Fertilizer advisories
//!
//! Static description/usage/application text per fertilizer product, the
//! tri-tier soil-nutrient commentary, and the composer that assembles the
//! full advice string returned by the fertilizer endpoint.

use crate::models::FertilizerInput;

/// Static guidance for a fertilizer product.
#[derive(Debug, Clone)]
pub struct FertilizerInfo {
    pub description: String,
    pub usage: String,
    pub application: String,
}

/// Look up the product guidance for a fertilizer name. Unknown names get a
/// generic entry built around the name itself.
pub fn info_for(fertilizer: &str) -> FertilizerInfo {
    let (description, usage, application) = match fertilizer {
        "Urea" => (
            "High nitrogen fertilizer (46% N)",
            "Promotes vegetative growth and leaf development",
            "Apply before planting or during early growth stages",
        ),
        "DAP" => (
            "Diammonium Phosphate (18% N, 46% P)",
            "Excellent for root development and early plant growth",
            "Apply at planting time for best results",
        ),
        "14-35-14" => (
            "Balanced fertilizer with high phosphorus",
            "Good for flowering and fruit development",
            "Apply during flowering stage",
        ),
        "28-28" => (
            "Equal nitrogen and phosphorus",
            "Balanced nutrition for overall plant health",
            "Can be used throughout growing season",
        ),
        "17-17-17" => (
            "Complete balanced fertilizer",
            "All-purpose nutrition for healthy growth",
            "Suitable for most crops and growth stages",
        ),
        "20-20" => (
            "High nitrogen-phosphorus blend",
            "Promotes both vegetative and root growth",
            "Best for early to mid-season application",
        ),
        "10-26-26" => (
            "Low nitrogen, high phosphorus and potassium",
            "Excellent for fruit and flower development",
            "Apply during reproductive stages",
        ),
        other => {
            return FertilizerInfo {
                description: format!("{other} fertilizer"),
                usage: "Follow manufacturer guidelines".to_string(),
                application: "Apply according to crop requirements".to_string(),
            }
        }
    };

    FertilizerInfo {
        description: description.to_string(),
        usage: usage.to_string(),
        application: application.to_string(),
    }
}

/// Nitrogen tier commentary: low below 20, high above 50, adequate between.
pub fn nitrogen_advice(nitrogen: f64) -> &'static str {
    if nitrogen < 20.0 {
        "• 🔴 Low nitrogen detected - this fertilizer will help boost leaf growth"
    } else if nitrogen > 50.0 {
        "• 🟡 High nitrogen levels - monitor to prevent excessive vegetative growth"
    } else {
        "• 🟢 Nitrogen levels are adequate"
    }
}

/// Phosphorus tier commentary: low below 15, good above 40, moderate between.
pub fn phosphorous_advice(phosphorous: f64) -> &'static str {
    if phosphorous < 15.0 {
        "• 🔴 Low phosphorus - will improve root development and flowering"
    } else if phosphorous > 40.0 {
        "• 🟢 Good phosphorus levels - maintain current status"
    } else {
        "• 🟡 Moderate phosphorus levels"
    }
}

/// Potassium tier commentary: low below 20, excellent above 50, moderate between.
pub fn potassium_advice(potassium: f64) -> &'static str {
    if potassium < 20.0 {
        "• 🔴 Low potassium - will enhance disease resistance and fruit quality"
    } else if potassium > 50.0 {
        "• 🟢 Excellent potassium levels"
    } else {
        "• 🟡 Moderate potassium levels"
    }
}

/// Compose the full multi-line advisory for a recommended fertilizer and
/// the soil conditions it was recommended for.
pub fn compose_advice(fertilizer: &str, input: &FertilizerInput) -> String {
    let info = info_for(fertilizer);

    let mut advice = format!("🌾 Recommended Fertilizer: {fertilizer}\n\n");
    advice.push_str(&format!("📋 Description: {}\n", info.description));
    advice.push_str(&format!("🎯 Usage: {}\n", info.usage));
    advice.push_str(&format!("⏰ Application: {}\n\n", info.application));

    advice.push_str("📊 Soil Analysis Recommendations:\n");
    advice.push_str(nitrogen_advice(input.nitrogen));
    advice.push('\n');
    advice.push_str(phosphorous_advice(input.phosphorous));
    advice.push('\n');
    advice.push_str(potassium_advice(input.potassium));
    advice.push('\n');

    advice.push_str(&format!(
        "\n🌱 Crop: {} | 🏔️ Soil: {}\n",
        input.crop_type, input.soil_type
    ));
    advice.push_str(&format!(
        "🌡️ Temperature: {}°C | 💧 Humidity: {}%\n",
        input.temperature, input.humidity
    ));

    advice
}
