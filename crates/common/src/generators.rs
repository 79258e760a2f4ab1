//! Test data generators
//!
//! Everything here is fresh per call: emails are keyed by the current
//! timestamp, the rest is random.

use chrono::Utc;
use rand::distributions::{Alphanumeric, Distribution, Uniform};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::Credentials;

/// Mail domain used for generated accounts
pub const TEST_EMAIL_DOMAIN: &str = "staffinc.co";

/// Video URL accepted by the training material section
pub const TRAINING_VIDEO_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

const FIRST_NAMES: &[&str] = &[
    "Adi", "Budi", "Citra", "Dewi", "Eka", "Fajar", "Gita", "Hendra", "Indah", "Joko",
    "Kartika", "Lestari", "Maya", "Nanda", "Oscar", "Putri", "Rizky", "Sari", "Tono", "Wulan",
];

const LAST_NAMES: &[&str] = &[
    "Santoso", "Wijaya", "Pratama", "Saputra", "Hidayat", "Nugroho", "Kusuma", "Setiawan",
    "Halim", "Gunawan", "Susanto", "Rahman", "Siregar", "Lubis", "Tanjung", "Wibowo",
];

const LOREM: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua", "enim",
    "ad", "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris", "nisi",
    "aliquip", "ex", "ea", "commodo", "consequat", "duis", "aute", "irure", "in", "voluptate",
];

const PASSWORD_SYMBOLS: &[u8] = b"!@#$%^&*-_";

/// `<prefix>+<unix millis>@staffinc.co`
pub fn generate_email(prefix: &str) -> String {
    format!(
        "{}+{}@{}",
        prefix,
        Utc::now().timestamp_millis(),
        TEST_EMAIL_DOMAIN
    )
}

/// Random non-memorable password of `length` characters
pub fn generate_password(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| {
            if rng.gen_bool(0.15) {
                *PASSWORD_SYMBOLS.choose(&mut rng).unwrap_or(&b'!') as char
            } else {
                Alphanumeric.sample(&mut rng) as char
            }
        })
        .collect()
}

/// Password with the suite's usual length
pub fn generate_default_password() -> String {
    generate_password(12)
}

pub fn generate_full_name() -> String {
    let mut rng = rand::thread_rng();
    let first = FIRST_NAMES.choose(&mut rng).unwrap_or(&"Test");
    let last = LAST_NAMES.choose(&mut rng).unwrap_or(&"User");
    format!("{} {}", first, last)
}

/// International-style mobile number, e.g. `+62 812-3456-7890`
pub fn generate_phone_number() -> String {
    let mut rng = rand::thread_rng();
    let digits = Uniform::from(0..10u8);
    let mut block = |n: usize| -> String {
        (0..n).map(|_| char::from(b'0' + digits.sample(&mut rng))).collect()
    };
    let (operator, first, second) = (block(2), block(4), block(4));
    format!("+62 8{}-{}-{}", operator, first, second)
}

/// Unique digital form name
pub fn generate_form_name_with_timestamp() -> String {
    format!("Automation Form {}", Utc::now().format("%Y%m%d-%H%M%S%.3f"))
}

/// Between `min` and `max` lorem words joined by spaces
pub fn lorem_words(min: usize, max: usize) -> String {
    let mut rng = rand::thread_rng();
    let count = if max > min { rng.gen_range(min..=max) } else { min };
    (0..count)
        .map(|_| *LOREM.choose(&mut rng).unwrap_or(&"lorem"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Capitalized sentence of `min..=max` words ending with a period
pub fn lorem_sentence(min: usize, max: usize) -> String {
    let words = lorem_words(min.max(1), max.max(1));
    let mut chars = words.chars();
    match chars.next() {
        Some(first) => format!("{}{}.", first.to_uppercase(), chars.as_str()),
        None => String::new(),
    }
}

/// A few sentences
pub fn lorem_paragraph() -> String {
    let mut rng = rand::thread_rng();
    let sentences = rng.gen_range(3..=6);
    (0..sentences)
        .map(|_| lorem_sentence(6, 12))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text of exactly `length` characters, used for max-length validation
pub fn create_long_text(length: usize) -> String {
    let mut text = String::with_capacity(length + 16);
    while text.len() < length {
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(&lorem_sentence(8, 16));
    }
    text.truncate(length);
    text
}

impl Credentials {
    /// Random credentials that belong to no account
    pub fn random() -> Self {
        let mut rng = rand::thread_rng();
        let user: String = (0..10)
            .map(|_| Alphanumeric.sample(&mut rng) as char)
            .collect::<String>()
            .to_lowercase();
        Self::new(format!("{}@example.com", user), generate_default_password())
    }

    /// Well-known invalid pair the backend rejects with 401
    pub fn invalid() -> Self {
        Self::new("invalid@staffinc.co", "wrongpassword")
    }

    /// Generated account with a timestamped email
    pub fn generate(prefix: &str) -> Self {
        Self::new(generate_email(prefix), generate_default_password())
    }
}

/// Registration request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationData {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl RegistrationData {
    pub fn generate(prefix: &str) -> Self {
        Self {
            email: generate_email(prefix),
            password: generate_default_password(),
            name: generate_full_name(),
        }
    }

    /// All fields blank, rejected by validation
    pub fn empty() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            name: String::new(),
        }
    }
}

/// Data for step 1 (basic information) of the form creation wizard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicInformationData {
    pub form_name: String,
    pub form_description: String,
    pub training_title: String,
    pub training_description: String,
    pub training_video_url: String,
}

impl BasicInformationData {
    pub fn generate() -> Self {
        Self {
            form_name: generate_form_name_with_timestamp(),
            form_description: lorem_sentence(10, 20),
            training_title: lorem_words(3, 5),
            training_description: lorem_paragraph(),
            training_video_url: TRAINING_VIDEO_URL.to_string(),
        }
    }
}
