use std::{env, fs};

/// Source files that define the shapes persisted in the key-value store.
/// Changing any of them changes the deployment token, which makes the
/// storage guard wipe all persisted state once after the next release.
const SCHEMA_SOURCES: &[&str] = &["src/model/tab.rs", "src/storage/parsing.rs"];

fn main() {
    for path in SCHEMA_SOURCES {
        println!("cargo:rerun-if-changed={}", path);
    }

    let token = if env::var("PROFILE").as_deref() == Ok("release") {
        let mut text = String::new();
        for path in SCHEMA_SOURCES {
            match fs::read_to_string(path) {
                Ok(source) => text.push_str(&source),
                Err(err) => panic!("schema source {} unreadable: {}", path, err),
            }
        }
        format!("{:016x}", fnv1a64(text.as_bytes()))
    } else {
        // Local builds keep a fixed sentinel so rebuilds never wipe storage.
        "dev".to_string()
    };

    println!("cargo:rustc-env=DEPLOYMENT_VERSION={}", token);
}

fn fnv1a64(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x00000100000001b3;

    let mut hash = OFFSET_BASIS;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}
