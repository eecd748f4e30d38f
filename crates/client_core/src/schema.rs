//! Response schemas in the provider's `responseSchema` dialect.

use serde_json::{json, Value};

pub fn five_whys_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "whys": {
                "type": "ARRAY",
                "description": "A list of 5 'why' questions and their corresponding answers, drilling down to the root cause.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "why": { "type": "STRING", "description": "The 'why' question." },
                        "answer": { "type": "STRING", "description": "The answer to the 'why' question." }
                    },
                    "required": ["why", "answer"]
                }
            },
            "rootCause": {
                "type": "STRING",
                "description": "The final, fundamental root cause identified after the 5 whys. This should be a process or condition, not a solution."
            }
        },
        "required": ["whys", "rootCause"]
    })
}

pub fn risk_details_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "description": {
                "type": "STRING",
                "description": "A detailed, narrative description of the risk, explaining the context, cause, and potential impact."
            },
            "objective": {
                "type": "STRING",
                "description": "A clear, concise risk objective stating the desired outcome if the risk is managed. It should be aspirational and measurable if possible (e.g., 'Ensure 99.9% data accuracy in quarterly reports')."
            },
            "statements": {
                "type": "ARRAY",
                "description": "An array of 3-5 distinct risk statements in 'If [cause], then [effect]' format.",
                "items": { "type": "STRING" }
            }
        },
        "required": ["description", "objective", "statements"]
    })
}
