//! Per-screen form drafts and their submission guards.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::{CoreError, Happiness, Screen};

const REDACTED: &str = "<redacted>";

/// Named form field accepted by field-change events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Account email.
    Email,
    /// Account password.
    Password,
    /// Age in years (signup).
    Age,
    /// Gender choice (signup).
    Gender,
    /// What helps the user calm down (signup).
    CopingMechanisms,
    /// Best part of the day (entry).
    Highlight,
    /// Worst part of the day (entry).
    Lowlight,
    /// Happiness score (entry).
    Happiness,
    /// Notable event (entry).
    MajorEvent,
}

impl Field {
    /// Every field, in form order.
    pub const ALL: [Self; 9] = [
        Self::Email,
        Self::Password,
        Self::Age,
        Self::Gender,
        Self::CopingMechanisms,
        Self::Highlight,
        Self::Lowlight,
        Self::Happiness,
        Self::MajorEvent,
    ];

    /// Wire name of the field, identical to the backend JSON key.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Password => "password",
            Self::Age => "age",
            Self::Gender => "gender",
            Self::CopingMechanisms => "coping_mechanisms",
            Self::Highlight => "highlight",
            Self::Lowlight => "lowlight",
            Self::Happiness => "happiness",
            Self::MajorEvent => "major_event",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = DraftError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DraftError::UnknownField(wanted.to_string()))
    }
}

/// Gender options offered by the signup form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Gender {
    /// Male.
    #[serde(rename = "male")]
    Male,
    /// Female.
    #[serde(rename = "female")]
    Female,
    /// Prefers not to say.
    #[serde(rename = "rather not say")]
    RatherNotSay,
}

impl Gender {
    /// Wire value sent to the backend.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::RatherNotSay => "rather not say",
        }
    }
}

impl FromStr for Gender {
    type Err = DraftError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        [Self::Male, Self::Female, Self::RatherNotSay]
            .into_iter()
            .find(|gender| gender.as_str().eq_ignore_ascii_case(raw.trim()))
            .ok_or_else(|| DraftError::UnknownGender(raw.to_string()))
    }
}

/// Login form state.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct LoginDraft {
    /// Email as typed.
    pub email: String,
    /// Password as typed.
    pub password: String,
}

impl LoginDraft {
    /// Evaluates the login guard.
    ///
    /// # Errors
    /// Returns [`DraftError::MissingField`] when email or password is blank.
    pub fn credentials(&self) -> Result<Credentials, DraftError> {
        Ok(Credentials {
            email: required(Field::Email, &self.email)?.trim().to_string(),
            password: required(Field::Password, &self.password)?.to_string(),
        })
    }
}

impl fmt::Debug for LoginDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginDraft")
            .field("email", &self.email)
            .field("password", &REDACTED)
            .finish()
    }
}

/// Signup form state.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SignupDraft {
    /// Email as typed.
    pub email: String,
    /// Password as typed.
    pub password: String,
    /// Age as typed.
    pub age: String,
    /// Gender choice as typed.
    pub gender: String,
    /// Coping mechanisms as typed.
    pub coping_mechanisms: String,
}

impl SignupDraft {
    /// Evaluates the signup guard.
    ///
    /// # Errors
    /// Returns [`DraftError::MissingField`] for blank fields,
    /// [`DraftError::NotANumber`] when age is not a non-negative integer, and
    /// [`DraftError::UnknownGender`] for gender values outside the offered set.
    pub fn registration(&self) -> Result<Registration, DraftError> {
        let email = required(Field::Email, &self.email)?.trim().to_string();
        let password = required(Field::Password, &self.password)?.to_string();
        let age = parse_number::<u32>(Field::Age, required(Field::Age, &self.age)?)?;
        let gender = required(Field::Gender, &self.gender)?.parse::<Gender>()?;
        let coping_mechanisms =
            required(Field::CopingMechanisms, &self.coping_mechanisms)?.to_string();

        Ok(Registration {
            email,
            password,
            age,
            gender,
            coping_mechanisms,
        })
    }
}

impl fmt::Debug for SignupDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupDraft")
            .field("email", &self.email)
            .field("password", &REDACTED)
            .field("age", &self.age)
            .field("gender", &self.gender)
            .field("coping_mechanisms", &self.coping_mechanisms)
            .finish()
    }
}

/// Dashboard entry form state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryDraft {
    /// Highlight as typed.
    pub highlight: String,
    /// Lowlight as typed.
    pub lowlight: String,
    /// Happiness as typed.
    pub happiness: String,
    /// Major event as typed.
    pub major_event: String,
}

impl EntryDraft {
    /// Evaluates the add-entry guard.
    ///
    /// # Errors
    /// Returns [`DraftError::MissingField`] for blank fields,
    /// [`DraftError::NotANumber`] for a non-integer happiness and
    /// [`DraftError::Invalid`] for a happiness outside `[1, 10]`.
    pub fn new_entry(&self) -> Result<NewEntry, DraftError> {
        let highlight = required(Field::Highlight, &self.highlight)?.to_string();
        let lowlight = required(Field::Lowlight, &self.lowlight)?.to_string();
        let happiness = parse_number::<i64>(
            Field::Happiness,
            required(Field::Happiness, &self.happiness)?,
        )?;
        let happiness = Happiness::new(happiness)?;
        let major_event = required(Field::MajorEvent, &self.major_event)?.to_string();

        Ok(NewEntry {
            highlight,
            lowlight,
            happiness,
            major_event,
        })
    }
}

/// Draft for whichever screen is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Draft {
    /// Login screen form.
    Login(LoginDraft),
    /// Signup screen form.
    Signup(SignupDraft),
    /// Dashboard entry form.
    Entry(EntryDraft),
}

impl Draft {
    /// Returns the empty draft matching `screen`.
    pub fn empty_for(screen: Screen) -> Self {
        match screen {
            Screen::Login => Self::Login(LoginDraft::default()),
            Screen::Signup => Self::Signup(SignupDraft::default()),
            Screen::Dashboard => Self::Entry(EntryDraft::default()),
        }
    }

    /// Screen this draft belongs to.
    pub fn screen(&self) -> Screen {
        match self {
            Self::Login(_) => Screen::Login,
            Self::Signup(_) => Screen::Signup,
            Self::Entry(_) => Screen::Dashboard,
        }
    }

    /// Fields shown on this draft's form, in order.
    pub fn fields(&self) -> &'static [Field] {
        match self {
            Self::Login(_) => &[Field::Email, Field::Password],
            Self::Signup(_) => &[
                Field::Email,
                Field::Password,
                Field::Age,
                Field::Gender,
                Field::CopingMechanisms,
            ],
            Self::Entry(_) => &[
                Field::Highlight,
                Field::Lowlight,
                Field::Happiness,
                Field::MajorEvent,
            ],
        }
    }

    /// Upserts one field value.
    ///
    /// # Errors
    /// Returns [`DraftError::FieldNotOnForm`] when `field` is not part of this
    /// draft's form; the draft is left unchanged.
    pub fn set(&mut self, field: Field, value: impl Into<String>) -> Result<(), DraftError> {
        let screen = self.screen();
        let slot = self
            .slot_mut(field)
            .ok_or(DraftError::FieldNotOnForm { field, screen })?;
        *slot = value.into();
        Ok(())
    }

    /// Returns the current value of `field`, if it belongs to this form.
    pub fn get(&self, field: Field) -> Option<&str> {
        let value = match (self, field) {
            (Self::Login(draft), Field::Email) => &draft.email,
            (Self::Login(draft), Field::Password) => &draft.password,
            (Self::Signup(draft), Field::Email) => &draft.email,
            (Self::Signup(draft), Field::Password) => &draft.password,
            (Self::Signup(draft), Field::Age) => &draft.age,
            (Self::Signup(draft), Field::Gender) => &draft.gender,
            (Self::Signup(draft), Field::CopingMechanisms) => &draft.coping_mechanisms,
            (Self::Entry(draft), Field::Highlight) => &draft.highlight,
            (Self::Entry(draft), Field::Lowlight) => &draft.lowlight,
            (Self::Entry(draft), Field::Happiness) => &draft.happiness,
            (Self::Entry(draft), Field::MajorEvent) => &draft.major_event,
            _ => return None,
        };
        Some(value.as_str())
    }

    /// Returns `true` when every field is empty.
    pub fn is_empty(&self) -> bool {
        self.fields()
            .iter()
            .all(|field| self.get(*field).is_none_or(str::is_empty))
    }

    fn slot_mut(&mut self, field: Field) -> Option<&mut String> {
        let slot = match (self, field) {
            (Self::Login(draft), Field::Email) => &mut draft.email,
            (Self::Login(draft), Field::Password) => &mut draft.password,
            (Self::Signup(draft), Field::Email) => &mut draft.email,
            (Self::Signup(draft), Field::Password) => &mut draft.password,
            (Self::Signup(draft), Field::Age) => &mut draft.age,
            (Self::Signup(draft), Field::Gender) => &mut draft.gender,
            (Self::Signup(draft), Field::CopingMechanisms) => &mut draft.coping_mechanisms,
            (Self::Entry(draft), Field::Highlight) => &mut draft.highlight,
            (Self::Entry(draft), Field::Lowlight) => &mut draft.lowlight,
            (Self::Entry(draft), Field::Happiness) => &mut draft.happiness,
            (Self::Entry(draft), Field::MajorEvent) => &mut draft.major_event,
            _ => return None,
        };
        Some(slot)
    }
}

/// Login credentials accepted by the login guard.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &REDACTED)
            .finish()
    }
}

/// Registration details accepted by the signup guard.
#[derive(Clone, PartialEq, Eq)]
pub struct Registration {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
    /// Age in years.
    pub age: u32,
    /// Gender choice.
    pub gender: Gender,
    /// What helps the user calm down.
    pub coping_mechanisms: String,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("email", &self.email)
            .field("password", &REDACTED)
            .field("age", &self.age)
            .field("gender", &self.gender)
            .field("coping_mechanisms", &self.coping_mechanisms)
            .finish()
    }
}

/// Entry accepted by the add-entry guard, ready to be posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    /// Best part of the day.
    pub highlight: String,
    /// Worst part of the day.
    pub lowlight: String,
    /// Happiness score.
    pub happiness: Happiness,
    /// Notable event.
    pub major_event: String,
}

/// Reasons a draft cannot be edited or submitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    /// Field name is not recognised.
    #[error("unknown field: {0}")]
    UnknownField(String),
    /// Field exists but is not on the active form.
    #[error("field {field} is not part of the {screen} form")]
    FieldNotOnForm {
        /// Rejected field.
        field: Field,
        /// Screen whose form was active.
        screen: Screen,
    },
    /// Required field is blank.
    #[error("{0} is required")]
    MissingField(Field),
    /// Numeric field does not hold an integer.
    #[error("{field} must be a whole number, got {value:?}")]
    NotANumber {
        /// Offending field.
        field: Field,
        /// Value as typed.
        value: String,
    },
    /// Gender is not one of the offered options.
    #[error("gender must be one of: male, female, rather not say (got {0:?})")]
    UnknownGender(String),
    /// Value failed model validation.
    #[error(transparent)]
    Invalid(#[from] CoreError),
}

fn required(field: Field, value: &str) -> Result<&str, DraftError> {
    if value.trim().is_empty() {
        return Err(DraftError::MissingField(field));
    }
    Ok(value)
}

fn parse_number<T: FromStr>(field: Field, value: &str) -> Result<T, DraftError> {
    value.trim().parse::<T>().map_err(|_| DraftError::NotANumber {
        field,
        value: value.to_string(),
    })
}
