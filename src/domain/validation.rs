use super::errors::ValidationError;
use super::models::FormSnapshot;

/// Checks the required fields in a fixed order and reports the first gap.
pub fn validate(snapshot: &FormSnapshot) -> Result<(), ValidationError> {
    if snapshot.education.is_empty() {
        return Err(ValidationError::MissingEducation);
    }
    if snapshot.sector.is_empty() {
        return Err(ValidationError::MissingSector);
    }
    if snapshot.location.is_empty() {
        return Err(ValidationError::MissingLocation);
    }
    if snapshot.skills.is_empty() {
        return Err(ValidationError::NoSkills);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SkillSet;

    fn snapshot(education: &str, sector: &str, location: &str, skills: &[&str]) -> FormSnapshot {
        let mut set = SkillSet::new();
        for skill in skills {
            set.add(skill);
        }
        FormSnapshot {
            education: education.to_string(),
            sector: sector.to_string(),
            location: location.to_string(),
            skills: set,
        }
    }

    #[test]
    fn test_complete_form_passes() {
        assert_eq!(validate(&snapshot("BTech", "Finance", "Mumbai", &["Excel"])), Ok(()));
    }

    #[test]
    fn test_education_reported_first() {
        let result = validate(&snapshot("", "", "", &[]));
        assert_eq!(result, Err(ValidationError::MissingEducation));
    }

    #[test]
    fn test_sector_before_location() {
        let result = validate(&snapshot("BTech", "", "", &[]));
        assert_eq!(result, Err(ValidationError::MissingSector));
    }

    #[test]
    fn test_location_before_skills() {
        let result = validate(&snapshot("BTech", "Finance", "", &[]));
        assert_eq!(result, Err(ValidationError::MissingLocation));
    }

    #[test]
    fn test_skills_last() {
        let result = validate(&snapshot("BTech", "Finance", "Mumbai", &[]));
        assert_eq!(result, Err(ValidationError::NoSkills));
        assert_eq!(result.unwrap_err().to_string(), "Please add at least one skill");
    }
}
