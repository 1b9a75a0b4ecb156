use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillSet {
    skills: Vec<String>,
}

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, skill: &str) -> bool {
        if skill.is_empty() || self.contains(skill) {
            return false;
        }
        self.skills.push(skill.to_string());
        true
    }

    pub fn remove(&mut self, skill: &str) -> bool {
        match self.skills.iter().position(|s| s == skill) {
            Some(index) => {
                self.skills.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s == skill)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.skills
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.skills.get(index).map(String::as_str)
    }

    pub fn to_hidden_value(&self) -> String {
        serde_json::to_string(&self.skills).unwrap_or_else(|_| "[]".to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    skills: SkillSet,
    hidden_value: String,
    revision: u64,
}

impl Default for SelectionState {
    fn default() -> Self {
        let skills = SkillSet::new();
        Self {
            hidden_value: skills.to_hidden_value(),
            skills,
            revision: 0,
        }
    }
}

impl SelectionState {
    pub fn add(&mut self, skill: &str) -> bool {
        let changed = self.skills.add(skill);
        if changed {
            self.sync();
        }
        changed
    }

    pub fn remove(&mut self, skill: &str) -> bool {
        let changed = self.skills.remove(skill);
        if changed {
            self.sync();
        }
        changed
    }

    pub fn skills(&self) -> &SkillSet {
        &self.skills
    }

    pub fn hidden_value(&self) -> &str {
        &self.hidden_value
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn sync(&mut self) {
        self.hidden_value = self.skills.to_hidden_value();
        self.revision += 1;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSnapshot {
    pub education: String,
    pub sector: String,
    pub location: String,
    pub skills: SkillSet,
}

impl FormSnapshot {
    pub fn into_request(self) -> RecommendationRequest {
        RecommendationRequest {
            education: self.education,
            skills: self.skills.as_slice().to_vec(),
            sector: self.sector,
            location: self.location,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub education: String,
    pub skills: Vec<String>,
    pub sector: String,
    pub location: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationItem {
    pub title: String,
    pub company: String,
    pub sector: String,
    pub location: String,
    #[serde(deserialize_with = "string_or_number")]
    pub duration: String,
    #[serde(deserialize_with = "string_or_number")]
    pub stipend: String,
    pub description: String,
    pub skills_required: Vec<String>,
    #[serde(deserialize_with = "number_or_zero")]
    pub rating: f64,
    #[serde(deserialize_with = "number_or_zero")]
    pub opportunities: f64,
    #[serde(deserialize_with = "number_or_zero")]
    pub match_score: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendationsResponse {
    #[serde(default)]
    pub recommendations: Vec<RecommendationItem>,
    #[serde(default)]
    pub total_count: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ErrorBody {
    // non-string values keep their JSON text
    #[serde(deserialize_with = "string_or_number")]
    pub error: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SectorsResponse {
    #[serde(default)]
    pub sectors: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationsResponse {
    #[serde(default)]
    pub locations: Vec<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn number_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    English,
    Hindi,
    Bengali,
    Tamil,
    Telugu,
    Marathi,
}

impl Language {
    pub const ALL: [Language; 6] = [
        Language::English,
        Language::Hindi,
        Language::Bengali,
        Language::Tamil,
        Language::Telugu,
        Language::Marathi,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
            Language::Bengali => "bn",
            Language::Tamil => "ta",
            Language::Telugu => "te",
            Language::Marathi => "mr",
        }
    }

    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|l| *l == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        let index = Self::ALL.iter().position(|l| *l == self).unwrap_or(0);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Language::English => "English",
            Language::Hindi => "हिन्दी",
            Language::Bengali => "বাংলা",
            Language::Tamil => "தமிழ்",
            Language::Telugu => "తెలుగు",
            Language::Marathi => "मराठी",
        };
        f.write_str(name)
    }
}
