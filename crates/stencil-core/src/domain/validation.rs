use crate::domain::{
    entities::{FileManifest, Profile, QuestionSet},
    error::{DomainError, ValidationError},
    value_objects::{AnswerValidator, AuthorIdentity},
};

/// Centralized domain validation.
///
/// Structural checks for profiles live here, next to the answer validators,
/// rather than scattered across entities.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_questions(questions: &QuestionSet) -> Result<(), DomainError> {
        questions.validate()
    }

    pub fn validate_manifest(
        manifest: &FileManifest,
        questions: &QuestionSet,
    ) -> Result<(), DomainError> {
        manifest.validate(questions)
    }

    pub fn validate_profile(profile: &Profile) -> Result<(), DomainError> {
        profile.validate()
    }

    /// Run the named answer validator.
    pub fn validate_answer(validator: AnswerValidator, input: &str) -> Result<(), ValidationError> {
        match validator {
            AnswerValidator::Semver => validate_version(input).map(|_| ()),
            AnswerValidator::Author => validate_author(input).map(|_| ()),
            AnswerValidator::Spdx => validate_license(input),
        }
    }
}

/// Accept `MAJOR.MINOR.PATCH` with optional `-pre.release` and `+build`.
pub fn validate_version(input: &str) -> Result<semver::Version, ValidationError> {
    semver::Version::parse(input).map_err(|_| ValidationError::InvalidVersion {
        input: input.into(),
    })
}

/// Accept `Name <email>` and return the parsed identity.
///
/// A blank string is missing rather than malformed.
pub fn validate_author(input: &str) -> Result<AuthorIdentity, ValidationError> {
    if input.trim().is_empty() {
        return Err(ValidationError::MissingAuthor);
    }

    let identity = AuthorIdentity::parse(input);
    if identity.name.is_empty() || identity.email.is_empty() {
        return Err(ValidationError::MalformedAuthor {
            input: input.into(),
        });
    }
    if !identity.email.contains('@') {
        return Err(ValidationError::InvalidEmail {
            email: identity.email,
        });
    }

    Ok(identity)
}

/// Accept a single SPDX identifier or an `AND`/`OR`/`WITH` expression.
pub fn validate_license(input: &str) -> Result<(), ValidationError> {
    spdx::Expression::parse(input)
        .map(|_| ())
        .map_err(|e| ValidationError::InvalidLicense {
            input: input.into(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn versions_accepted() {
        for v in ["1.2.3", "0.1.0", "0.1.0-beta.1", "2.0.0+build5", "1.0.0-rc.1+sha.5114f85"] {
            assert!(validate_version(v).is_ok(), "should accept {v}");
        }
    }

    #[test]
    fn versions_rejected() {
        for v in ["1.2", "v1.2.3", "abc", "", "1.2.3.4", "01.2.3"] {
            assert_eq!(
                validate_version(v),
                Err(ValidationError::InvalidVersion { input: v.into() }),
                "should reject {v}"
            );
        }
    }

    #[test]
    fn author_accepted_and_trimmed() {
        let id = validate_author("  Jane Doe   < jane@example.com > ").unwrap();
        assert_eq!(id.name, "Jane Doe");
        assert_eq!(id.email, "jane@example.com");
    }

    #[test]
    fn author_empty_is_missing() {
        assert_eq!(validate_author(""), Err(ValidationError::MissingAuthor));
        assert_eq!(validate_author("   "), Err(ValidationError::MissingAuthor));
    }

    #[test]
    fn author_without_email_segment_is_malformed() {
        for input in ["Jane Doe", "Jane Doe <>", "Jane Doe < >", "<jane@example.com>"] {
            assert!(
                matches!(validate_author(input), Err(ValidationError::MalformedAuthor { .. })),
                "should be malformed: {input}"
            );
        }
    }

    #[test]
    fn author_email_without_at_is_invalid() {
        assert_eq!(
            validate_author("Jane <jane.example.com>"),
            Err(ValidationError::InvalidEmail {
                email: "jane.example.com".into()
            })
        );
    }

    #[test]
    fn licenses_accepted() {
        for l in [
            "MIT",
            "Apache-2.0",
            "Unlicense",
            "(MIT OR Apache-2.0)",
            "MIT AND BSD-3-Clause",
            "GPL-2.0-or-later WITH Classpath-exception-2.0",
        ] {
            assert!(validate_license(l).is_ok(), "should accept {l}");
        }
    }

    #[test]
    fn licenses_rejected() {
        for l in ["Not A License", "", "MIT OR", "(MIT"] {
            assert!(
                matches!(validate_license(l), Err(ValidationError::InvalidLicense { .. })),
                "should reject {l}"
            );
        }
    }

    #[test]
    fn validate_answer_dispatches_by_validator() {
        assert!(DomainValidator::validate_answer(AnswerValidator::Semver, "1.0.0").is_ok());
        assert!(DomainValidator::validate_answer(AnswerValidator::Author, "nobody").is_err());
        assert!(DomainValidator::validate_answer(AnswerValidator::Spdx, "MIT").is_ok());
    }
}
