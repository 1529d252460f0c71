//! Static school/meal account-code table for the district.
//!
//! Account codes are `accountId/locationId/mealPeriodId` triples understood
//! by the upstream meal-locator API. The reverse lookup recovers the school
//! and meal for a triple, which is how the manual fallback store is keyed.

use std::fmt;
use std::str::FromStr;

/// All schools the proxy knows about, in display order.
pub const SCHOOLS: [&str; 6] = ["AMD", "Brookside", "Claremont", "OHS", "Park", "Roosevelt"];

/// (school, breakfast code, lunch code)
const ACCOUNT_CODES: [(&str, &str, &str); 6] = [
    ("Park", "152/833/1", "152/833/2"),
    ("Brookside", "152/832/1", "152/832/2"),
    ("Claremont", "152/831/1", "152/831/2"),
    ("Roosevelt", "152/834/1", "152/834/2"),
    ("AMD", "152/830/1", "152/830/2"),
    ("OHS", "152/829/1", "152/829/2"),
];

/// Meal periods the upstream distinguishes (period id 1 and 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MealPeriod {
    Breakfast,
    Lunch,
}

impl MealPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealPeriod::Breakfast => "breakfast",
            MealPeriod::Lunch => "lunch",
        }
    }
}

impl fmt::Display for MealPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "breakfast" => Ok(MealPeriod::Breakfast),
            "lunch" => Ok(MealPeriod::Lunch),
            other => Err(format!("unknown meal period '{}'", other)),
        }
    }
}

/// Account code for a school/meal pair, if the school is known.
/// School names match case-insensitively so CLI input stays forgiving.
pub fn account_code(school: &str, meal: MealPeriod) -> Option<&'static str> {
    ACCOUNT_CODES
        .iter()
        .find(|(name, _, _)| name.eq_ignore_ascii_case(school))
        .map(|(_, breakfast, lunch)| match meal {
            MealPeriod::Breakfast => *breakfast,
            MealPeriod::Lunch => *lunch,
        })
}

/// Reverse lookup: recover (school, meal) from an account triple.
/// Unknown triples yield `None`, which disables the manual fallback.
pub fn school_meal_for_triple(
    account_id: &str,
    location_id: &str,
    meal_period_id: &str,
) -> Option<(&'static str, &'static str)> {
    let code = format!("{}/{}/{}", account_id, location_id, meal_period_id);
    for (school, breakfast, lunch) in ACCOUNT_CODES {
        if code == breakfast {
            return Some((school, MealPeriod::Breakfast.as_str()));
        }
        if code == lunch {
            return Some((school, MealPeriod::Lunch.as_str()));
        }
    }
    None
}

/// High schools run an A/B cycle; elementary schools run 1–6.
pub fn is_high_school(school: &str) -> bool {
    school.eq_ignore_ascii_case("AMD") || school.eq_ignore_ascii_case("OHS")
}
