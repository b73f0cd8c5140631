//! Choice lists offered by the passenger form and their display labels.

pub const PCLASS_CHOICES: [(&str, &str); 3] = [
    ("1", "First Class"),
    ("2", "Second Class"),
    ("3", "Third Class"),
];

pub const SEX_CHOICES: [(&str, &str); 2] = [("male", "Male"), ("female", "Female")];

pub const EMBARKED_CHOICES: [(&str, &str); 3] = [
    ("C", "Cherbourg"),
    ("Q", "Queenstown"),
    ("S", "Southampton"),
];

pub const AGE_MIN: f64 = 0.0;
pub const AGE_MAX: f64 = 100.0;

fn lookup(table: &[(&str, &'static str)], code: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(key, _)| *key == code)
        .map(|(_, label)| *label)
}

pub fn pclass_label(code: &str) -> Option<&'static str> {
    lookup(&PCLASS_CHOICES, code.trim())
}

pub fn sex_label(code: &str) -> Option<&'static str> {
    lookup(&SEX_CHOICES, code)
}

pub fn embarked_label(code: &str) -> Option<&'static str> {
    lookup(&EMBARKED_CHOICES, code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{PassengerClass, Port, Sex};

    #[test]
    fn every_domain_value_has_a_label() {
        for class in PassengerClass::ALL {
            assert!(pclass_label(class.code()).is_some());
        }
        for sex in Sex::ALL {
            assert!(sex_label(sex.code()).is_some());
        }
        for port in Port::ALL {
            assert!(embarked_label(port.code()).is_some());
        }
    }

    #[test]
    fn unknown_codes_have_no_label() {
        assert_eq!(embarked_label("X"), None);
        assert_eq!(pclass_label("4"), None);
        assert_eq!(sex_label(""), None);
        assert_eq!(embarked_label("C"), Some("Cherbourg"));
    }
}
