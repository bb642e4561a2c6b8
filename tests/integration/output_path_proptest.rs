// Property tests for output path derivation

use nvrender::engine::{CONTAINER_EXT, Resolution, derive_output_path};
use proptest::prelude::*;
use std::path::{Path, PathBuf};

fn stem() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_][A-Za-z0-9_ .-]{0,24}"
}

fn extension() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just(".mkv".to_string()),
        Just(".ts".to_string()),
        Just(".m2ts".to_string()),
        "\\.[a-z0-9]{1,5}",
    ]
}

fn resolution() -> impl Strategy<Value = Resolution> {
    (1u32..=8192, 1u32..=4320)
        .prop_map(|(w, h)| format!("{}x{}", w, h).parse::<Resolution>().unwrap())
}

fn codec() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,7}"
}

proptest! {
    #[test]
    fn derivation_is_deterministic(
        stem in stem(),
        ext in extension(),
        res in resolution(),
        codec in codec(),
    ) {
        let input = PathBuf::from("/in/dir").join(format!("{}{}", stem, ext));
        let first = derive_output_path(&input, Path::new("/out"), &codec, &res).unwrap();
        let second = derive_output_path(&input, Path::new("/out"), &codec, &res).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn extension_is_always_container(
        stem in stem(),
        ext in extension(),
        res in resolution(),
        codec in codec(),
    ) {
        let input = PathBuf::from(format!("{}{}", stem, ext));
        let out = derive_output_path(&input, Path::new("/out"), &codec, &res).unwrap();
        prop_assert_eq!(out.extension().and_then(|e| e.to_str()), Some(CONTAINER_EXT));
    }

    #[test]
    fn output_lands_directly_under_root(
        dirs in prop::collection::vec("[a-z]{1,8}", 0..4),
        stem in stem(),
        ext in extension(),
        res in resolution(),
        codec in codec(),
    ) {
        let mut input = PathBuf::from("/media");
        for d in &dirs {
            input.push(d);
        }
        input.push(format!("{}{}", stem, ext));

        let root = Path::new("/renders/conv");
        let out = derive_output_path(&input, root, &codec, &res).unwrap();
        prop_assert_eq!(out.parent(), Some(root));

        let name = out.file_name().unwrap().to_str().unwrap().to_string();
        let suffix = format!(".{}.{}.{}", codec, res.height(), CONTAINER_EXT);
        prop_assert!(name.ends_with(&suffix), "{} should end with {}", name, suffix);
    }
}
