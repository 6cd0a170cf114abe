use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::macros::format_description;
use time::Date;

use crate::ValidationError;

const ISO_DATE_LEN: usize = 10;

/// Calendar date of a price point, serialized as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TradingDate(Date);

impl TradingDate {
    /// Parse the leading `YYYY-MM-DD` of a wire value.
    ///
    /// The historical endpoint sends stringified timestamps such as
    /// `2024-01-02 00:00:00-05:00`; only the calendar part is kept.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        let head = trimmed
            .get(..ISO_DATE_LEN)
            .ok_or_else(|| ValidationError::InvalidDate {
                value: input.to_owned(),
            })?;

        let rest = &trimmed[ISO_DATE_LEN..];
        if !(rest.is_empty() || rest.starts_with(' ') || rest.starts_with('T')) {
            return Err(ValidationError::InvalidDate {
                value: input.to_owned(),
            });
        }

        Date::parse(head, format_description!("[year]-[month]-[day]"))
            .map(Self)
            .map_err(|_| ValidationError::InvalidDate {
                value: input.to_owned(),
            })
    }

    pub fn format_iso(self) -> String {
        format!(
            "{:04}-{:02}-{:02}",
            self.0.year(),
            u8::from(self.0.month()),
            self.0.day()
        )
    }
}

impl Display for TradingDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_iso())
    }
}

impl Serialize for TradingDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_iso())
    }
}

impl<'de> Deserialize<'de> for TradingDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}
