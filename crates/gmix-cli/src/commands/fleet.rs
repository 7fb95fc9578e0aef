use anyhow::{anyhow, Result};
use gmix_cli::cli::RunArgs;
use gmix_core::project_context;
use serde_json::Value;
use std::any::Any;

use crate::commands::common::build_context;

pub fn handle(args: &RunArgs) -> Result<()> {
    let context = build_context(args)?;
    let value = encode(&context)?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

/// Encode anything this binary knows how to print as JSON.
fn encode(object: &dyn Any) -> Result<Value> {
    if let Some(records) = project_context(object) {
        return Ok(serde_json::to_value(records)?);
    }
    if let Some(text) = object.downcast_ref::<String>() {
        return Ok(Value::String(text.clone()));
    }
    Err(anyhow!("no JSON encoding for this value"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_falls_through_to_strings() {
        let value = encode(&"fleet".to_string()).unwrap();
        assert_eq!(value, Value::String("fleet".into()));
        assert!(encode(&1.5_f64).is_err());
    }
}
