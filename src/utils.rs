use glam::DVec3;
use yaml_rust::Yaml;

use crate::errors::ConfigError;

/// Reads an optional floating point parameter, accepting both integer and real yaml values.
pub fn yaml_f64(cfg: &Yaml, name: &str) -> Result<Option<f64>, ConfigError> {
    match &cfg[name] {
        Yaml::BadValue | Yaml::Null => Ok(None),
        Yaml::Integer(i) => Ok(Some(*i as f64)),
        value => value
            .as_f64()
            .map(Some)
            .ok_or_else(|| ConfigError::InvalidParameter {
                name: name.to_string(),
                value: format!("{:?}", value),
            }),
    }
}

/// Like [`yaml_f64`] but the parameter must be present.
pub fn yaml_f64_required(cfg: &Yaml, name: &str, path: &str) -> Result<f64, ConfigError> {
    yaml_f64(cfg, name)?.ok_or_else(|| ConfigError::MissingParameter(format!("{path}:{name}")))
}

/// Reads an optional vector parameter, either a list of three numbers or a
/// single number interpreted as the x-component.
pub fn yaml_dvec3(cfg: &Yaml, name: &str) -> Result<Option<DVec3>, ConfigError> {
    let invalid = || ConfigError::InvalidParameter {
        name: name.to_string(),
        value: format!("{:?}", cfg[name]),
    };
    match &cfg[name] {
        Yaml::Array(values) => {
            let components = values
                .iter()
                .map(|value| match value {
                    Yaml::Integer(i) => Ok(*i as f64),
                    value => value.as_f64().ok_or_else(invalid),
                })
                .collect::<Result<Vec<_>, _>>()?;
            match components[..] {
                [x, y, z] => Ok(Some(DVec3::new(x, y, z))),
                _ => Err(invalid()),
            }
        }
        _ => Ok(yaml_f64(cfg, name)?.map(|x| DVec3::new(x, 0., 0.))),
    }
}

#[cfg(test)]
mod test {
    use yaml_rust::YamlLoader;

    use super::*;

    #[test]
    fn test_yaml_f64() {
        let cfg = &YamlLoader::load_from_str("a: 1\nb: 1e-8\nc: \"x\"").unwrap()[0];
        assert_eq!(yaml_f64(cfg, "a"), Ok(Some(1.)));
        assert_eq!(yaml_f64(cfg, "b"), Ok(Some(1e-8)));
        assert_eq!(yaml_f64(cfg, "d"), Ok(None));
        assert!(matches!(
            yaml_f64(cfg, "c"),
            Err(ConfigError::InvalidParameter { .. })
        ));
        assert_eq!(
            yaml_f64_required(cfg, "d", "left"),
            Err(ConfigError::MissingParameter("left:d".to_string()))
        );
    }

    #[test]
    fn test_yaml_dvec3() {
        let cfg = &YamlLoader::load_from_str("a: [1., 2, -0.5]\nb: 3.\nc: [1., 2.]").unwrap()[0];
        assert_eq!(yaml_dvec3(cfg, "a"), Ok(Some(DVec3::new(1., 2., -0.5))));
        assert_eq!(yaml_dvec3(cfg, "b"), Ok(Some(DVec3::new(3., 0., 0.))));
        assert_eq!(yaml_dvec3(cfg, "d"), Ok(None));
        assert!(yaml_dvec3(cfg, "c").is_err());
    }
}
