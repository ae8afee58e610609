//! Disease treatment advisories
//!
//! Static treatment plans per detected condition plus the severity law,
//! a pure function of the predicted label and confidence.

use serde::Serialize;

/// A recommended product with its application guidance.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub application: &'static str,
}

/// Treatment plan for a detected condition.
#[derive(Debug, Clone)]
pub struct TreatmentPlan {
    pub advice: &'static str,
    pub products: Vec<Product>,
    pub prevention: Vec<&'static str>,
}

/// Look up the treatment plan for a disease label. Unknown labels get the
/// generic consult-an-expert plan.
pub fn treatment_for(disease: &str) -> TreatmentPlan {
    match disease {
        "Healthy" => TreatmentPlan {
            advice: "Your plant appears healthy! Continue with regular care and monitoring.",
            products: vec![Product {
                name: "Balanced NPK Fertilizer",
                kind: "Preventive",
                application: "Apply as per crop requirements",
            }],
            prevention: vec![
                "Maintain proper plant spacing for air circulation",
                "Water early in the day to allow leaves to dry",
                "Remove any dead or diseased plant material",
                "Monitor plants regularly for early disease detection",
            ],
        },
        "Powdery" => TreatmentPlan {
            advice: "Powdery mildew detected. This fungal disease appears as white powdery \
                     spots on leaves. Treat immediately to prevent spread.",
            products: vec![
                Product {
                    name: "Sulfur-based Fungicide",
                    kind: "Fungicide",
                    application: "Spray on affected areas, repeat every 7-14 days",
                },
                Product {
                    name: "Neem Oil",
                    kind: "Organic",
                    application: "Mix with water and spray weekly",
                },
                Product {
                    name: "Baking Soda Solution",
                    kind: "Home Remedy",
                    application: "1 tablespoon per gallon of water, spray leaves",
                },
            ],
            prevention: vec![
                "Improve air circulation around plants",
                "Avoid overhead watering",
                "Remove and destroy infected plant parts",
                "Apply preventive fungicide during humid conditions",
                "Plant resistant varieties when available",
            ],
        },
        "Rust" => TreatmentPlan {
            advice: "Rust disease detected. This fungal infection causes orange-brown \
                     pustules on leaves. Early treatment is crucial.",
            products: vec![
                Product {
                    name: "Copper-based Fungicide",
                    kind: "Fungicide",
                    application: "Apply every 7-10 days until symptoms disappear",
                },
                Product {
                    name: "Mancozeb",
                    kind: "Fungicide",
                    application: "Spray thoroughly covering all leaf surfaces",
                },
                Product {
                    name: "Triazole Fungicides",
                    kind: "Systemic",
                    application: "Follow manufacturer instructions",
                },
            ],
            prevention: vec![
                "Remove infected leaves immediately",
                "Avoid working with plants when wet",
                "Ensure good drainage",
                "Space plants properly for air flow",
                "Rotate crops annually",
                "Use disease-free seeds and transplants",
            ],
        },
        _ => TreatmentPlan {
            advice: "Disease detected. Consult with agricultural extension services for \
                     proper diagnosis and treatment.",
            products: Vec::new(),
            prevention: vec![
                "Maintain good plant hygiene",
                "Monitor plants regularly",
            ],
        },
    }
}

/// Severity of a detection, derived from confidence and condition.
pub fn severity_level(confidence: f64, disease: &str) -> &'static str {
    if disease == "Healthy" {
        "Good"
    } else if confidence > 0.8 {
        if matches!(disease, "Powdery" | "Rust") {
            "High"
        } else {
            "Medium"
        }
    } else if confidence > 0.6 {
        "Medium"
    } else {
        "Low"
    }
}
