/// Types that expose their fields for CSV-style header and value lines.
///
/// `field_names` lists names in declaration order; `field_values` produces
/// one rendered value per name, in the same order. The facade only calls
/// into this trait; how a type renders its fields is the implementor's
/// business.
pub trait Tabular {
    /// Field names in declaration order.
    fn field_names() -> &'static [&'static str];

    /// Field values rendered as text, one per name.
    fn field_values(&self) -> Vec<String>;
}

/// One header line for `T`, names joined by `delim`.
pub fn header_line<T: Tabular>(delim: &str) -> String {
    T::field_names().join(delim)
}

/// One value line for `object`, values joined by `delim`.
pub fn object_line<T: Tabular>(object: &T, delim: &str) -> String {
    object.field_values().join(delim)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Cloudlet {
        id: u32,
        status: &'static str,
        finish_time: f64,
    }

    impl Tabular for Cloudlet {
        fn field_names() -> &'static [&'static str] {
            &["id", "status", "finish_time"]
        }

        fn field_values(&self) -> Vec<String> {
            vec![
                self.id.to_string(),
                self.status.to_string(),
                format!("{:.2}", self.finish_time),
            ]
        }
    }

    #[test]
    fn test_header_line() {
        assert_eq!(header_line::<Cloudlet>(","), "id,status,finish_time");
        assert_eq!(header_line::<Cloudlet>("; "), "id; status; finish_time");
    }

    #[test]
    fn test_object_line() {
        let cloudlet = Cloudlet {
            id: 7,
            status: "SUCCESS",
            finish_time: 42.75,
        };
        assert_eq!(object_line(&cloudlet, ","), "7,SUCCESS,42.75");
    }
}
