use serde_json::Value;

use crate::config::TripPolicy;
use crate::error::ValidationError;
use crate::models::trip_request::TripRequest;

/// Validate and normalize a raw request body into a `TripRequest`.
///
/// Missing fields are reported before malformed numbers, and malformed numbers
/// before the budget floor.
pub fn validate(raw: &Value, policy: &TripPolicy) -> Result<TripRequest, ValidationError> {
    let city = match raw.get("city") {
        Some(Value::String(city)) if !city.trim().is_empty() => city.trim().to_string(),
        _ => return Err(ValidationError::MissingField("city")),
    };
    let budget_value = present(raw.get("budget").or_else(|| raw.get("totalBudget")))
        .ok_or(ValidationError::MissingField("budget"))?;
    let days_value = present(raw.get("days")).ok_or(ValidationError::MissingField("days"))?;

    let total_budget = positive_integer("budget", budget_value)?;
    let days = positive_integer("days", days_value)?;
    let days = u32::try_from(days)
        .ok()
        .filter(|days| *days <= policy.max_days)
        .ok_or_else(|| ValidationError::InvalidNumber {
            field: "days",
            value: days.to_string(),
            reason: format!("must be at most {}", policy.max_days),
        })?;

    let minimum = u64::from(days).saturating_mul(policy.min_daily_cost);
    if total_budget < minimum {
        return Err(ValidationError::BudgetTooLow {
            budget: total_budget,
            days,
            minimum,
            currency: policy.currency_symbol.clone(),
        });
    }

    Ok(TripRequest {
        city,
        total_budget,
        days,
        preferences: preferences(raw.get("preferences")),
    })
}

// Blank strings count as absent.
fn present(value: Option<&Value>) -> Option<&Value> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(value) => Some(value),
    }
}

fn positive_integer(field: &'static str, value: &Value) -> Result<u64, ValidationError> {
    let invalid = |reason: &str| ValidationError::InvalidNumber {
        field,
        value: match value {
            Value::String(s) => s.trim().to_string(),
            other => other.to_string(),
        },
        reason: reason.to_string(),
    };

    let number = match value {
        Value::Number(n) => match (n.as_u64(), n.as_f64()) {
            (Some(v), _) => v,
            (None, Some(v)) => whole(v).ok_or_else(|| invalid("must be a positive whole number"))?,
            (None, None) => return Err(invalid("not a number")),
        },
        Value::String(s) => {
            let trimmed = s.trim();
            match trimmed.parse::<u64>() {
                Ok(v) => v,
                Err(_) => trimmed
                    .parse::<f64>()
                    .ok()
                    .and_then(whole)
                    .ok_or_else(|| invalid("not a positive whole number"))?,
            }
        }
        _ => return Err(invalid("not a number")),
    };

    if number == 0 {
        return Err(invalid("must be greater than zero"));
    }
    Ok(number)
}

fn whole(v: f64) -> Option<u64> {
    if v.is_finite() && v > 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64 {
        Some(v as u64)
    } else {
        None
    }
}

fn preferences(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<&str>>()
            .join(", "),
        _ => String::new(),
    }
}
