// src/domain/criteria.rs

/// User-supplied filter criteria. Every field is optional; an absent field
/// switches the matching filter stage off.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub rooms: Option<u32>,
    pub district: Option<String>,
    pub max_price: Option<f64>,
}

impl FilterCriteria {
    /// Builds criteria from raw prompt answers. Blank answers mean "no filter".
    pub fn from_inputs(rooms: &str, district: &str, budget: &str) -> Self {
        let rooms = rooms.trim();
        let rooms = if rooms.is_empty() {
            None
        } else {
            match rooms.parse::<u32>() {
                Ok(n) => Some(n),
                Err(_) => {
                    tracing::warn!("ignoring room count {rooms:?}: not a whole number");
                    None
                }
            }
        };

        let district = Some(district.trim())
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        Self {
            rooms,
            district,
            max_price: parse_budget(budget),
        }
    }

    /// Budget ceiling; unlimited when none was given.
    pub fn ceiling(&self) -> f64 {
        self.max_price.unwrap_or(f64::INFINITY)
    }
}

/// Parses a budget like "45 000 000" or "45,000,000".
/// Anything blank, unparsable, negative or non-finite means no ceiling.
pub fn parse_budget(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',' && *c != '_')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_accepts_thousands_separators() {
        assert_eq!(parse_budget("45 000 000"), Some(45_000_000.0));
        assert_eq!(parse_budget("45,000,000"), Some(45_000_000.0));
        assert_eq!(parse_budget(" 1_500_000 "), Some(1_500_000.0));
    }

    #[test]
    fn invalid_budget_is_unlimited() {
        assert_eq!(parse_budget(""), None);
        assert_eq!(parse_budget("a lot"), None);
        assert_eq!(parse_budget("-5"), None);
        assert_eq!(parse_budget("inf"), None);

        let criteria = FilterCriteria::from_inputs("", "", "whatever");
        assert_eq!(criteria.ceiling(), f64::INFINITY);
    }

    #[test]
    fn blank_inputs_disable_filters() {
        let criteria = FilterCriteria::from_inputs("  ", "   ", "");
        assert_eq!(criteria, FilterCriteria::default());
    }

    #[test]
    fn inputs_are_trimmed() {
        let criteria = FilterCriteria::from_inputs(" 3 ", " Медеуский ", "50000000");
        assert_eq!(criteria.rooms, Some(3));
        assert_eq!(criteria.district.as_deref(), Some("Медеуский"));
        assert_eq!(criteria.max_price, Some(50_000_000.0));
    }

    #[test]
    fn non_numeric_rooms_are_ignored() {
        let criteria = FilterCriteria::from_inputs("three", "", "");
        assert_eq!(criteria.rooms, None);
    }
}
