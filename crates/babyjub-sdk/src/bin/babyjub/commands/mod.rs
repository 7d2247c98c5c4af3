pub mod hash;
pub mod keygen;
pub mod point;
pub mod pubkey;
pub mod sign;
pub mod verify;

/// Quote free text for the hand-formatted JSON output.
pub fn json_string(text: &str) -> String {
    serde_json::Value::from(text).to_string()
}
