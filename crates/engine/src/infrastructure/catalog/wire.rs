//! Catalog payloads as served by the game backend
//!
//! Mirrors `GET /api/v1/game/scenarios` and `GET /api/v1/game/scenario-configs`:
//! camelCase fields, Mongo-style `_id`, and a `{ success, ... }` envelope. A
//! bare JSON array of scenarios is accepted too.

use serde::Deserialize;
use sprachreise_domain::{
    DifficultyLevel, GameKind, MapPosition, Scenario, ScenarioConfig, ScenarioId, ScenarioName,
};

use crate::infrastructure::ports::CatalogError;

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioDto {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub story_context: String,
    pub order: i64,
    #[serde(default = "default_true")]
    pub is_required: bool,
    #[serde(default)]
    pub available_levels: Vec<String>,
    #[serde(default)]
    pub map_position: Option<MapPositionDto>,
}

/// Either coordinate may be missing or null in stored scenarios.
#[derive(Debug, Clone, Deserialize)]
pub struct MapPositionDto {
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
}

impl TryFrom<ScenarioDto> for Scenario {
    type Error = CatalogError;

    fn try_from(dto: ScenarioDto) -> Result<Self, Self::Error> {
        let id = ScenarioId::new(dto.id)?;
        let order = u32::try_from(dto.order).map_err(|_| {
            CatalogError::malformed(format!("scenario {} has invalid order {}", id, dto.order))
        })?;
        let levels = dto
            .available_levels
            .iter()
            .map(|level| level.parse::<DifficultyLevel>())
            .collect::<Result<Vec<_>, _>>()?;

        let mut scenario = Scenario::new(id, ScenarioName::new(dto.name)?, order, levels)?
            .with_description(dto.description)
            .with_story_context(dto.story_context)
            .with_required(dto.is_required);

        // Markers without a usable position are not drawn; the scenario still counts
        if let Some((x, y)) = dto.map_position.and_then(|p| Some((p.x?, p.y?))) {
            match MapPosition::new(x, y) {
                Ok(position) => scenario = scenario.with_map_position(position),
                Err(e) => tracing::warn!(
                    scenario_id = %scenario.id(),
                    error = %e,
                    "Ignoring map position outside the map"
                ),
            }
        }

        Ok(scenario)
    }
}

/// The config endpoint returns the scenario populated or as a bare id.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ScenarioRefDto {
    Id(String),
    Populated {
        #[serde(rename = "_id", alias = "id")]
        id: String,
    },
}

impl ScenarioRefDto {
    fn id(&self) -> &str {
        match self {
            ScenarioRefDto::Id(id) => id,
            ScenarioRefDto::Populated { id } => id,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameTypeDto {
    pub component_name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioConfigDto {
    pub scenario: ScenarioRefDto,
    pub difficulty_level: String,
    #[serde(default)]
    pub game_type: Option<GameTypeDto>,
    #[serde(default)]
    pub instructions: Option<String>,
}

impl ScenarioConfigDto {
    /// Convert to a domain config.
    ///
    /// Returns `Ok(None)` for configs without a usable game type; those
    /// scenario levels are treated as unconfigured.
    pub fn into_domain(self) -> Result<Option<ScenarioConfig>, CatalogError> {
        let scenario_id = ScenarioId::new(self.scenario.id())?;
        let level = self.difficulty_level.parse::<DifficultyLevel>()?;

        let Some(game_type) = self.game_type else {
            return Ok(None);
        };
        let game = match game_type.component_name.parse::<GameKind>() {
            Ok(game) => game,
            Err(e) => {
                tracing::warn!(
                    scenario_id = %scenario_id,
                    level = %level,
                    error = %e,
                    "Skipping scenario config with unknown game component"
                );
                return Ok(None);
            }
        };

        let mut config = ScenarioConfig::new(scenario_id, level, game);
        if let Some(instructions) = self.instructions {
            config = config.with_instructions(instructions);
        }
        Ok(Some(config))
    }
}

/// Whole catalog document: bare array or backend envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CatalogDocument {
    Bare(Vec<ScenarioDto>),
    Envelope {
        #[serde(default = "default_true")]
        success: bool,
        #[serde(default)]
        scenarios: Vec<ScenarioDto>,
        #[serde(default)]
        configs: Vec<ScenarioConfigDto>,
    },
}

impl CatalogDocument {
    pub fn parse(json: &str) -> Result<Self, CatalogError> {
        serde_json::from_str(json).map_err(CatalogError::malformed)
    }

    pub fn scenarios(&self) -> Result<Vec<Scenario>, CatalogError> {
        let dtos = match self {
            CatalogDocument::Bare(scenarios) => scenarios,
            CatalogDocument::Envelope {
                success: false, ..
            } => return Err(CatalogError::unavailable("backend reported failure")),
            CatalogDocument::Envelope { scenarios, .. } => scenarios,
        };
        dtos.iter().cloned().map(Scenario::try_from).collect()
    }

    pub fn configs(&self) -> Result<Vec<ScenarioConfig>, CatalogError> {
        match self {
            CatalogDocument::Bare(_) => Ok(Vec::new()),
            CatalogDocument::Envelope {
                success: false, ..
            } => Err(CatalogError::unavailable("backend reported failure")),
            CatalogDocument::Envelope { configs, .. } => {
                let mut result = Vec::with_capacity(configs.len());
                for dto in configs.iter().cloned() {
                    if let Some(config) = dto.into_domain()? {
                        result.push(config);
                    }
                }
                Ok(result)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENVELOPE: &str = r#"{
        "success": true,
        "scenarios": [
            {
                "_id": "s2",
                "name": "City Registration",
                "description": "Register your address",
                "storyContext": "Alex needs an Anmeldung",
                "order": 2,
                "isRequired": false,
                "availableLevels": ["A1"],
                "mapPosition": { "x": 55, "y": 40 }
            },
            {
                "_id": "s1",
                "name": "Accommodation",
                "order": 1,
                "availableLevels": ["A1", "A2"],
                "mapPosition": { "x": 20 }
            }
        ],
        "configs": [
            {
                "scenario": { "_id": "s1", "name": "Accommodation" },
                "difficultyLevel": "A1",
                "gameType": { "componentName": "MemoryGame" },
                "instructions": "Match the furniture words"
            },
            {
                "scenario": "s1",
                "difficultyLevel": "A2",
                "gameType": { "componentName": "UnknownGame" }
            },
            { "scenario": "s2", "difficultyLevel": "A1" }
        ]
    }"#;

    #[test]
    fn parses_backend_envelope() {
        let doc = CatalogDocument::parse(ENVELOPE).unwrap();
        let scenarios = doc.scenarios().unwrap();
        assert_eq!(scenarios.len(), 2);

        let s2 = &scenarios[0];
        assert_eq!(s2.id().as_str(), "s2");
        assert!(!s2.is_required());
        assert_eq!(s2.story_context(), "Alex needs an Anmeldung");
        assert!(s2.map_position().is_some());

        let s1 = &scenarios[1];
        assert!(s1.is_required());
        assert_eq!(s1.available_levels(), &[DifficultyLevel::A1, DifficultyLevel::A2]);
        assert!(s1.map_position().is_none());
    }

    #[test]
    fn keeps_only_configs_with_known_games() {
        let doc = CatalogDocument::parse(ENVELOPE).unwrap();
        let configs = doc.configs().unwrap();
        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0].game, GameKind::Memory);
        assert_eq!(configs[0].difficulty_level, DifficultyLevel::A1);
        assert_eq!(
            configs[0].instructions.as_deref(),
            Some("Match the furniture words")
        );
    }

    #[test]
    fn parses_bare_array() {
        let doc = CatalogDocument::parse(
            r#"[{ "id": "a", "name": "A", "order": 1, "availableLevels": ["B1"] }]"#,
        )
        .unwrap();
        assert_eq!(doc.scenarios().unwrap().len(), 1);
        assert!(doc.configs().unwrap().is_empty());
    }

    #[test]
    fn failed_envelope_is_unavailable() {
        let doc = CatalogDocument::parse(r#"{ "success": false }"#).unwrap();
        assert!(matches!(doc.scenarios(), Err(CatalogError::Unavailable(_))));
    }

    #[test]
    fn invalid_scenarios_are_malformed() {
        for json in [
            r#"[{ "_id": "a", "name": "A", "order": 0, "availableLevels": ["A1"] }]"#,
            r#"[{ "_id": "a", "name": "A", "order": -3, "availableLevels": ["A1"] }]"#,
            r#"[{ "_id": "a", "name": "A", "order": 1, "availableLevels": [] }]"#,
            r#"[{ "_id": "a", "name": "A", "order": 1, "availableLevels": ["Z9"] }]"#,
            r#"[{ "_id": "", "name": "A", "order": 1, "availableLevels": ["A1"] }]"#,
        ] {
            let doc = CatalogDocument::parse(json).unwrap();
            assert!(
                matches!(doc.scenarios(), Err(CatalogError::Malformed(_))),
                "expected malformed for {}",
                json
            );
        }
    }

    #[test]
    fn out_of_range_position_is_dropped() {
        let doc = CatalogDocument::parse(
            r#"[{ "_id": "a", "name": "A", "order": 1, "availableLevels": ["A1"],
                  "mapPosition": { "x": 150, "y": 20 } }]"#,
        )
        .unwrap();
        assert!(doc.scenarios().unwrap()[0].map_position().is_none());
    }
}
