//! Fake data for `/data?quantity=`

use chrono::{Days, NaiveDate};
use rand::seq::IndexedRandom;
use rand::Rng;

use roster_api_types::{CommentPayload, Gender, PersonPayload, VotePayload};

const MALE_NAMES: &[&str] = &[
    "James", "John", "Robert", "Michael", "William", "David", "Richard", "Joseph", "Thomas", "Charles",
    "Daniel", "Matthew", "Anthony", "Mark", "Paul", "Steven", "Andrew", "Joshua", "Kevin", "Brian",
];

const FEMALE_NAMES: &[&str] = &[
    "Mary", "Patricia", "Jennifer", "Linda", "Elizabeth", "Barbara", "Susan", "Jessica", "Sarah", "Karen",
    "Nancy", "Lisa", "Betty", "Margaret", "Sandra", "Ashley", "Emily", "Donna", "Michelle", "Carol",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez", "Martinez",
    "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor", "Moore", "Jackson", "Martin",
];

const COUNTRIES: &[&str] = &[
    "France", "Germany", "Canada", "Brazil", "Japan", "Kenya", "Norway", "Mexico", "India", "Portugal",
    "Senegal", "Vietnam", "Chile", "Ireland", "Morocco",
];

const JOBS: &[&str] = &[
    "Engineer", "Teacher", "Nurse", "Accountant", "Designer", "Pharmacist", "Architect", "Journalist",
    "Electrician", "Librarian",
];

const COMPANIES: &[&str] = &[
    "Acme", "Globex", "Initech", "Umbrella", "Hooli", "Vandelay", "Wonka", "Stark", "Wayne", "Tyrell",
];

const DOMAINS: &[&str] = &["example.com", "example.org", "mail.test", "roster.dev"];

const LOREM: &[&str] = &[
    "Lorem ipsum dolor sit amet, consectetur adipiscing elit.",
    "Sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.",
    "Ut enim ad minim veniam, quis nostrud exercitation ullamco laboris.",
    "Duis aute irure dolor in reprehenderit in voluptate velit esse.",
    "Excepteur sint occaecat cupidatat non proident, sunt in culpa.",
];

/// Oldest generated date of birth
const BIRTH_EPOCH: (i32, u32, u32) = (1950, 1, 1);
const BIRTH_SPAN_DAYS: u64 = 50 * 365;

fn pick<'a, R: Rng + ?Sized>(values: &[&'a str], rng: &mut R) -> &'a str {
    values.choose(rng).copied().unwrap_or_default()
}

fn maybe<'a, R: Rng + ?Sized>(values: &[&'a str], rng: &mut R) -> Option<String> {
    rng.random_bool(0.8).then(|| pick(values, rng).to_string())
}

/// One plausible person; passes payload validation
pub fn fake_person<R: Rng + ?Sized>(rng: &mut R) -> PersonPayload {
    let gender = if rng.random_bool(0.5) { Gender::Male } else { Gender::Female };
    let first_name = match gender {
        Gender::Male => pick(MALE_NAMES, rng),
        Gender::Female => pick(FEMALE_NAMES, rng),
    };
    let last_name = pick(LAST_NAMES, rng);
    let email = format!(
        "{}.{}{}@{}",
        first_name.to_lowercase(),
        last_name.to_lowercase(),
        rng.random_range(1..1000),
        pick(DOMAINS, rng)
    );

    let (year, month, day) = BIRTH_EPOCH;
    let epoch = NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default();
    let date_of_birth = epoch
        .checked_add_days(Days::new(rng.random_range(0..BIRTH_SPAN_DAYS)))
        .unwrap_or(epoch);

    PersonPayload {
        is_admin: rng.random_bool(0.1),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        avatar: rng
            .random_bool(0.5)
            .then(|| format!("https://robohash.org/{}{}.png", first_name, last_name)),
        job: maybe(JOBS, rng),
        company: maybe(COMPANIES, rng),
        email,
        gender,
        date_of_birth,
        country_of_birth: pick(COUNTRIES, rng).to_string(),
    }
}

pub fn fake_people<R: Rng + ?Sized>(quantity: usize, rng: &mut R) -> Vec<PersonPayload> {
    (0..quantity).map(|_| fake_person(rng)).collect()
}

/// `quantity` comments owned by random people; none without people
pub fn fake_comments<R: Rng + ?Sized>(quantity: usize, person_ids: &[i64], rng: &mut R) -> Vec<CommentPayload> {
    (0..quantity)
        .filter_map(|_| {
            let user_id = *person_ids.choose(rng)?;
            Some(CommentPayload {
                user_id,
                content: pick(LOREM, rng).to_string(),
            })
        })
        .collect()
}

/// `quantity` votes by random people on random comments
pub fn fake_votes<R: Rng + ?Sized>(
    quantity: usize,
    person_ids: &[i64],
    comment_ids: &[i64],
    rng: &mut R,
) -> Vec<VotePayload> {
    (0..quantity)
        .filter_map(|_| {
            let user_id = *person_ids.choose(rng)?;
            let comment_id = *comment_ids.choose(rng)?;
            Some(VotePayload { comment_id, user_id })
        })
        .collect()
}
