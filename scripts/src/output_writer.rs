//! Export of the deployment results to the frontend.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use alloy::primitives::Address;
use json::JsonValue;
use tempfile::NamedTempFile;
use tracing::info;

use crate::{
    constants::{ADDRESS_FILE_NAME, JSON_INDENT},
    errors::ScriptError,
};

/// Mode of newly created output files, readable by the frontend server
#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o644;

/// Write the address record and the artifact copy of a deployed contract.
///
/// Both documents are staged next to their target before either one is moved
/// in place, so a failed write keeps the files of the previous run.
pub fn write_frontend_files(
    output_dir: &Path,
    contract_name: &str,
    address: Address,
    artifact: &JsonValue,
) -> Result<(), ScriptError> {
    ensure_output_dir(output_dir)?;

    let mut address_record = JsonValue::new_object();
    address_record[contract_name] = JsonValue::String(address.to_string());

    let [address_file, artifact_file] = output_files(output_dir, contract_name);
    let staged = [
        (stage_json(&address_file, &address_record)?, address_file),
        (stage_json(&artifact_file, artifact)?, artifact_file),
    ];

    for (file, target) in staged {
        file.persist(&target)
            .map_err(|e| ScriptError::JsonOutputError(format!("{}: {}", target.display(), e)))?;
        info!("Wrote {}", target.display());
    }

    Ok(())
}

/// Paths of the files written for the given contract
pub fn output_files(output_dir: &Path, contract_name: &str) -> [PathBuf; 2] {
    [
        output_dir.join(ADDRESS_FILE_NAME),
        output_dir.join(format!("{}.json", contract_name)),
    ]
}

/// Create the output directory if it's missing, its parent must exist
fn ensure_output_dir(output_dir: &Path) -> Result<(), ScriptError> {
    if output_dir.is_dir() {
        return Ok(());
    }

    fs::create_dir(output_dir)
        .map_err(|e| ScriptError::JsonOutputError(format!("{}: {}", output_dir.display(), e)))
}

/// Write the pretty printed json to a temporary file next to `target`.
///
/// Numbers keep a 64 bit mantissa, integers past `u64::MAX` come out in
/// exponent form. Compiler artifacts hold none.
fn stage_json(target: &Path, value: &JsonValue) -> Result<NamedTempFile, ScriptError> {
    let dir = target.parent().unwrap_or(Path::new("."));
    let mut file =
        NamedTempFile::new_in(dir).map_err(|e| ScriptError::JsonOutputError(e.to_string()))?;
    file.write_all(json::stringify_pretty(value.clone(), JSON_INDENT).as_bytes())
        .map_err(|e| ScriptError::JsonOutputError(e.to_string()))?;
    match_target_permissions(&file, target)?;

    Ok(file)
}

/// Give the staged file the mode of the file it replaces, or `0o644` for a
/// new one, temporary files being owner-only
#[cfg(unix)]
fn match_target_permissions(file: &NamedTempFile, target: &Path) -> Result<(), ScriptError> {
    use std::os::unix::fs::PermissionsExt;

    let mode = fs::metadata(target)
        .map(|metadata| metadata.permissions().mode() & 0o777)
        .unwrap_or(NEW_FILE_MODE);
    file.as_file()
        .set_permissions(fs::Permissions::from_mode(mode))
        .map_err(|e| ScriptError::JsonOutputError(format!("{}: {}", target.display(), e)))
}

/// Permissions are left to the platform defaults
#[cfg(not(unix))]
fn match_target_permissions(_file: &NamedTempFile, _target: &Path) -> Result<(), ScriptError> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;
    use tempfile::tempdir;

    const DEPLOYED: Address = address!("5FbDB2315678afecb367f032d93F642f64180aa3");

    fn artifact() -> JsonValue {
        json::parse(r#"{"contractName": "TokenTakeOver", "abi": [], "bytecode": "0x6080"}"#)
            .unwrap()
    }

    #[test]
    fn writes_address_record_with_two_space_indent() {
        let dir = tempdir().unwrap();

        write_frontend_files(dir.path(), "TokenTakeOver", DEPLOYED, &artifact()).unwrap();

        let record = fs::read_to_string(dir.path().join(ADDRESS_FILE_NAME)).unwrap();
        assert_eq!(
            record,
            "{\n  \"TokenTakeOver\": \"0x5FbDB2315678afecb367f032d93F642f64180aa3\"\n}"
        );
    }

    #[test]
    fn artifact_copy_keeps_key_order() {
        let dir = tempdir().unwrap();

        write_frontend_files(dir.path(), "TokenTakeOver", DEPLOYED, &artifact()).unwrap();

        let copy = fs::read_to_string(dir.path().join("TokenTakeOver.json")).unwrap();
        assert_eq!(
            copy,
            "{\n  \"contractName\": \"TokenTakeOver\",\n  \"abi\": [],\n  \"bytecode\": \"0x6080\"\n}"
        );
    }

    #[test]
    fn creates_missing_output_dir() {
        let root = tempdir().unwrap();
        let dir = root.path().join("contracts");

        write_frontend_files(&dir, "TokenTakeOver", DEPLOYED, &artifact()).unwrap();

        for path in output_files(&dir, "TokenTakeOver") {
            assert!(path.exists());
        }
    }

    #[test]
    fn does_not_create_missing_parents() {
        let root = tempdir().unwrap();
        let dir = root.path().join("frontend").join("src").join("contracts");

        let err = write_frontend_files(&dir, "TokenTakeOver", DEPLOYED, &artifact()).unwrap_err();

        assert!(matches!(err, ScriptError::JsonOutputError(_)));
        assert!(!root.path().join("frontend").exists());
    }

    #[test]
    fn leaves_no_temporary_files() {
        let dir = tempdir().unwrap();

        write_frontend_files(dir.path(), "TokenTakeOver", DEPLOYED, &artifact()).unwrap();

        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn new_files_are_world_readable() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempdir().unwrap();

        write_frontend_files(dir.path(), "TokenTakeOver", DEPLOYED, &artifact()).unwrap();

        for path in output_files(dir.path(), "TokenTakeOver") {
            let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
            assert_eq!(mode, 0o644, "{}", path.display());
        }
    }

    #[cfg(unix)]
    #[test]
    fn overwritten_files_keep_their_mode() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempdir().unwrap();
        let address_file = dir.path().join(ADDRESS_FILE_NAME);
        fs::write(&address_file, "{}").unwrap();
        fs::set_permissions(&address_file, fs::Permissions::from_mode(0o664)).unwrap();

        write_frontend_files(dir.path(), "TokenTakeOver", DEPLOYED, &artifact()).unwrap();

        let mode = fs::metadata(&address_file).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o664);
        assert!(fs::read_to_string(&address_file).unwrap().contains("TokenTakeOver"));
    }

    #[test]
    fn big_integers_lose_precision_in_the_copy() {
        let dir = tempdir().unwrap();
        let document = json::parse(r#"{"small": 8545, "big": 123456789012345678901234567890}"#)
            .unwrap();

        write_frontend_files(dir.path(), "TokenTakeOver", DEPLOYED, &document).unwrap();

        let copy = fs::read_to_string(dir.path().join("TokenTakeOver.json")).unwrap();
        assert!(copy.contains("\"small\": 8545"));
        assert!(!copy.contains("123456789012345678901234567890"));
    }
}
