use std::path::Path;

use anyhow::{Context, Result};
use songbook_core::seed;

/// Write the seed catalog to `dir` in every supported format.
pub fn run_seed(dir: &Path) -> Result<()> {
    seed::write_seed_files(dir)
        .with_context(|| format!("Failed to write seed documents to {}", dir.display()))?;

    println!("✓ Wrote seed documents to {}", dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_run_seed_creates_six_documents() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("nested");
        run_seed(&target).unwrap();

        let count = std::fs::read_dir(&target).unwrap().count();
        assert_eq!(count, 6);
    }
}
