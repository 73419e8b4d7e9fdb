use crate::error::{ProcessingError, Result};
use crate::readers::InputPaths;
use crate::utils::constants::{CITIES_FILE, CONTINENTS_FILE, METEORITES_FILE};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::debug;
use zip::ZipArchive;

/// Extracts the input tables from a zip archive into a temporary directory.
///
/// The directory, and every file extracted into it, is removed when the
/// extractor is dropped, so it must outlive any pipeline run reading from it.
pub struct ArchiveExtractor {
    temp_dir: TempDir,
    extracted_files: HashMap<String, PathBuf>,
}

impl ArchiveExtractor {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new().map_err(|e| {
            ProcessingError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Failed to create temporary directory: {}", e),
            ))
        })?;

        Ok(Self {
            temp_dir,
            extracted_files: HashMap::new(),
        })
    }

    pub fn temp_dir_path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Extract the member whose file name is `file_name`, wherever it sits in
    /// the archive tree.
    pub fn extract_file(&mut self, zip_path: &Path, file_name: &str) -> Result<PathBuf> {
        if let Some(path) = self.extracted_files.get(file_name) {
            return Ok(path.clone());
        }

        let file = File::open(zip_path)?;
        let mut archive = ZipArchive::new(file)?;

        let index = (0..archive.len())
            .find(|&i| {
                archive
                    .by_index(i)
                    .ok()
                    .map(|entry| member_file_name(entry.name()) == file_name && !entry.is_dir())
                    .unwrap_or(false)
            })
            .ok_or_else(|| {
                ProcessingError::InvalidFormat(format!(
                    "File '{}' not found in archive '{}'",
                    file_name,
                    zip_path.display()
                ))
            })?;

        let mut zip_file = archive.by_index(index)?;
        let dest_path = self.temp_dir.path().join(file_name);

        let mut dest_file = File::create(&dest_path)?;
        let mut writer = BufWriter::new(&mut dest_file);
        let bytes = std::io::copy(&mut zip_file, &mut writer)?;
        writer.flush()?;

        debug!(file_name, bytes, "extracted archive member");

        self.extracted_files
            .insert(file_name.to_string(), dest_path.clone());

        Ok(dest_path)
    }

    /// Extract the three input tables and return their temporary paths
    pub fn extract_inputs(&mut self, zip_path: &Path) -> Result<InputPaths> {
        let meteorites = self.extract_file(zip_path, METEORITES_FILE)?;
        let cities = self.extract_file(zip_path, CITIES_FILE)?;
        let continents = self.extract_file(zip_path, CONTINENTS_FILE)?;

        Ok(InputPaths::new(meteorites, cities, continents))
    }

    pub fn list_extracted_files(&self) -> Vec<&String> {
        self.extracted_files.keys().collect()
    }
}

fn member_file_name(member: &str) -> &str {
    member.rsplit('/').next().unwrap_or(member)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;
    use zip::{CompressionMethod, ZipWriter};

    fn create_test_zip(members: &[(&str, &str)]) -> Result<NamedTempFile> {
        let file = NamedTempFile::new()?;
        {
            let mut zip = ZipWriter::new(&file);
            for (name, content) in members {
                zip.start_file(
                    *name,
                    zip::write::FileOptions::default()
                        .compression_method(CompressionMethod::Stored),
                )?;
                zip.write_all(content.as_bytes())?;
            }
            zip.finish()?;
        }
        Ok(file)
    }

    #[test]
    fn test_extract_inputs_from_nested_folder() -> Result<()> {
        let test_zip = create_test_zip(&[
            ("data/meteorite-landings.csv", "name,recclass\nAachen,L5\n"),
            ("data/worldcitiespop.csv", "Country,AccentCity\nde,Aachen\n"),
            ("countryContinent.csv", "country,code_2,continent\nGermany,DE,Europe\n"),
        ])?;

        let mut extractor = ArchiveExtractor::new()?;
        let paths = extractor.extract_inputs(test_zip.path())?;

        assert!(paths.meteorites.exists());
        assert!(paths.cities.starts_with(extractor.temp_dir_path()));
        let content = std::fs::read_to_string(&paths.continents)?;
        assert!(content.contains("Germany"));
        assert_eq!(extractor.list_extracted_files().len(), 3);

        Ok(())
    }

    #[test]
    fn test_missing_member_is_invalid_format() -> Result<()> {
        let test_zip = create_test_zip(&[("meteorite-landings.csv", "name\n")])?;

        let mut extractor = ArchiveExtractor::new()?;
        let result = extractor.extract_inputs(test_zip.path());

        assert!(matches!(result, Err(ProcessingError::InvalidFormat(_))));
        Ok(())
    }

    #[test]
    fn test_already_extracted_file() -> Result<()> {
        let test_zip = create_test_zip(&[("worldcitiespop.csv", "Country,AccentCity\n")])?;
        let mut extractor = ArchiveExtractor::new()?;

        let path1 = extractor.extract_file(test_zip.path(), CITIES_FILE)?;
        let path2 = extractor.extract_file(test_zip.path(), CITIES_FILE)?;

        assert_eq!(path1, path2);
        assert_eq!(extractor.list_extracted_files().len(), 1);
        Ok(())
    }
}
