use time::PrimitiveDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// `dd/MM/yyyy hh:mm AM`
const SHORT_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[day]/[month]/[year] [hour repr:12]:[minute] [period]"
);

/// Local date-time as the backend sends it: `2024-05-01T10:15:30.123`
const ISO_LOCAL: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute][optional [:[second][optional [.[subsecond]]]]]"
);

pub fn format_date_short(date_time: Option<PrimitiveDateTime>) -> String {
    date_time
        .and_then(|dt| dt.format(SHORT_FORMAT).ok())
        .unwrap_or_default()
}

pub fn parse_iso_local(text: &str) -> Result<PrimitiveDateTime, time::error::Parse> {
    PrimitiveDateTime::parse(text, ISO_LOCAL)
}

/// Serde adapter for optional ISO local date-times (`#[serde(with = "iso_local_option")]`)
pub mod iso_local_option {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::PrimitiveDateTime;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<PrimitiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(text) if !text.is_empty() => super::parse_iso_local(&text)
                .map(Some)
                .map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }

    pub fn serialize<S>(value: &Option<PrimitiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => {
                let text = dt
                    .format(super::ISO_LOCAL)
                    .map_err(serde::ser::Error::custom)?;
                serializer.serialize_some(&text)
            }
            None => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_format_date_short() {
        assert_eq!(
            format_date_short(Some(datetime!(2024-05-01 14:05:09))),
            "01/05/2024 02:05 PM"
        );
        assert_eq!(
            format_date_short(Some(datetime!(2024-12-31 00:30))),
            "31/12/2024 12:30 AM"
        );
        assert_eq!(format_date_short(None), "");
    }

    #[test]
    fn test_parse_iso_local_variants() {
        assert_eq!(
            parse_iso_local("2024-05-01T10:15:30").unwrap(),
            datetime!(2024-05-01 10:15:30)
        );
        assert_eq!(
            parse_iso_local("2024-05-01T10:15").unwrap(),
            datetime!(2024-05-01 10:15)
        );
        assert_eq!(
            parse_iso_local("2024-05-01T10:15:30.250").unwrap(),
            datetime!(2024-05-01 10:15:30.25)
        );
        assert!(parse_iso_local("01/05/2024").is_err());
    }
}
