//! Property tests for toggle handling and the output format default

use camino::Utf8PathBuf;
use cgf_converter::ArgsParser;
use cgf_converter::args::flags::{self, FlagAction};
use cgf_converter::models::Toggle;
use proptest::prelude::*;
use std::fs;
use tempfile::TempDir;

fn toggle_spellings() -> Vec<(&'static str, Toggle)> {
    flags::spellings()
        .filter_map(|(name, action)| match action {
            FlagAction::Toggle(toggle) => Some((name, toggle)),
            _ => None,
        })
        .collect()
}

fn model_file() -> (TempDir, Utf8PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let root = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    let model = root.join("model.cgf");
    fs::write(&model, b"").unwrap();
    (temp_dir, model)
}

proptest! {
    #[test]
    fn repeating_toggles_does_not_change_result(
        picks in prop::collection::vec(any::<prop::sample::Index>(), 0..8),
        upper in any::<bool>(),
    ) {
        let (_temp_dir, model) = model_file();
        let spellings = toggle_spellings();
        let chosen: Vec<String> = picks
            .iter()
            .map(|index| spellings[index.index(spellings.len())].0)
            .map(|name| if upper { name.to_uppercase() } else { name.to_string() })
            .collect();

        let mut once = vec![model.to_string()];
        once.extend(chosen.iter().cloned());
        let mut twice = once.clone();
        twice.extend(chosen.iter().cloned());

        let parser = ArgsParser::new();
        prop_assert_eq!(parser.parse(&once).unwrap(), parser.parse(&twice).unwrap());
    }

    #[test]
    fn collada_default_only_without_explicit_format(
        picks in prop::collection::vec(any::<prop::sample::Index>(), 0..6),
    ) {
        let (_temp_dir, model) = model_file();
        let spellings = toggle_spellings();
        let chosen: Vec<(&str, Toggle)> = picks
            .iter()
            .map(|index| spellings[index.index(spellings.len())])
            .collect();

        let mut tokens = vec![model.to_string()];
        tokens.extend(chosen.iter().map(|(name, _)| name.to_string()));
        let args = ArgsParser::new().parse(&tokens).unwrap();

        let explicit: Vec<_> = chosen
            .iter()
            .filter_map(|(_, toggle)| match toggle {
                Toggle::Output(format) => Some(*format),
                _ => None,
            })
            .collect();
        let formats = args.output_formats();

        if explicit.is_empty() {
            prop_assert!(formats.collada);
            prop_assert_eq!(formats.iter().count(), 1);
        } else {
            for format in formats.iter() {
                prop_assert!(explicit.contains(&format));
            }
            for format in &explicit {
                prop_assert!(formats.contains(*format));
            }
        }
    }
}
