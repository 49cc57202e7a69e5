//! Offline fixture-repair tool: rewrites exported fixture files in place,
//! replacing plaintext passwords on account entries with argon2 hashes.
//! Entries already in PHC form are left untouched, so the tool is safe to
//! run repeatedly over the same files.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use clap::Parser;
use serde_json::Value;

/// Model discriminator for account entries in exported fixtures.
const ACCOUNT_MODEL: &str = "auth.user";

#[derive(Parser, Debug)]
#[command(
    name = "hash_fixtures",
    about = "Rehash plaintext passwords in exported fixture files"
)]
struct Args {
    /// Fixture files to rewrite in place (JSON array or single object)
    #[arg(required = true)]
    paths: Vec<PathBuf>,
}

fn hash_password(plaintext: &str) -> Result<String> {
    if plaintext.starts_with("$argon2") {
        return Ok(plaintext.to_string());
    }
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| anyhow::anyhow!("failed to hash password: {e}"))
}

fn hash_entry(entry: &mut Value) -> Result<()> {
    let is_account = entry
        .get("model")
        .and_then(Value::as_str)
        .map(|model| model == ACCOUNT_MODEL)
        .unwrap_or(false);
    if !is_account {
        return Ok(());
    }

    let Some(password) = entry
        .get("fields")
        .and_then(|fields| fields.get("password"))
        .and_then(Value::as_str)
        .map(str::to_string)
    else {
        return Ok(());
    };

    entry["fields"]["password"] = Value::String(hash_password(&password)?);
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    for path in &args.paths {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let mut fixture: Value = serde_json::from_str(&raw)
            .with_context(|| format!("{} is not valid JSON", path.display()))?;

        match &mut fixture {
            Value::Array(entries) => {
                for entry in entries {
                    hash_entry(entry)?;
                }
            }
            Value::Object(_) => hash_entry(&mut fixture)?,
            _ => bail!("{} does not contain fixture entries", path.display()),
        }

        fs::write(path, serde_json::to_string_pretty(&fixture)?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("rehashed {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plaintext_passwords_are_rehashed() {
        let mut entry = json!({
            "model": "auth.user",
            "fields": { "password": "hunter2" }
        });
        hash_entry(&mut entry).unwrap();
        let hashed = entry["fields"]["password"].as_str().unwrap();
        assert!(hashed.starts_with("$argon2"));
    }

    #[test]
    fn hashed_passwords_and_other_models_are_untouched() {
        let mut hashed = json!({
            "model": "auth.user",
            "fields": { "password": "$argon2id$v=19$m=19456,t=2,p=1$abc$def" }
        });
        hash_entry(&mut hashed).unwrap();
        assert_eq!(
            hashed["fields"]["password"],
            "$argon2id$v=19$m=19456,t=2,p=1$abc$def"
        );

        let mut other = json!({
            "model": "bazaar.customer",
            "fields": { "password": "not-a-user" }
        });
        hash_entry(&mut other).unwrap();
        assert_eq!(other["fields"]["password"], "not-a-user");
    }
}
