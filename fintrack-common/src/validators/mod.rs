#[derive(Debug)]
pub enum Validity {
    Valid,
    Invalid(String),
}

impl Validity {
    pub fn is_valid(&self) -> bool {
        match &self {
            Validity::Valid => true,
            Validity::Invalid(_) => false,
        }
    }
}

pub fn validate_email_address(email: &str) -> Validity {
    if email.chars().count() > 320 {
        return Validity::Invalid(String::from("Email address is too long."));
    }

    for c in email.chars() {
        if c == ' ' || !c.is_ascii() {
            return Validity::Invalid(String::from("Email address cannot contain a space."));
        }
    }

    if email.contains("@.") {
        return Validity::Invalid(String::from(
            "Domain name in email address cannot begin with a period.",
        ));
    }

    let email = match email.split_once('@') {
        Some(s) => s,
        None => {
            return Validity::Invalid(String::from("Email address must contain an at symbol (@)."))
        }
    };

    if email.0.is_empty() || email.1.len() < 3 {
        return Validity::Invalid(String::from("Email username or domain name is too short."));
    }

    if email.1.contains('@') || !email.1.contains('.') {
        return Validity::Invalid(String::from(
            "Email address must have only one at symbol (@) and the domain must contain a period.",
        ));
    }

    if email.1.ends_with('.') {
        return Validity::Invalid(String::from("Email address cannot end with a period."));
    }

    Validity::Valid
}

/// A month key is a four-digit year, a slash, and a one-or-two-digit month
/// (`2024/5` or `2024/05`). Records are partitioned by this string, not by a
/// day-level date, so no calendar validation happens here (month `13` is
/// accepted the same way the original schema accepted it).
pub fn validate_month_key(date: &str) -> Validity {
    const INVALID_MSG: &str = "Invalid date format. Use YYYY/M or YYYY/MM";

    let Some((year, month)) = date.split_once('/') else {
        return Validity::Invalid(String::from(INVALID_MSG));
    };

    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return Validity::Invalid(String::from(INVALID_MSG));
    }

    if month.is_empty() || month.len() > 2 || !month.bytes().all(|b| b.is_ascii_digit()) {
        return Validity::Invalid(String::from(INVALID_MSG));
    }

    Validity::Valid
}
