use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::assemble::assemble;
use crate::error::{Result, ScanError};
use crate::filename::parse_filename;
use crate::keywords::KeywordSet;
use crate::model::{DocumentReport, ExtractionRecord};
use crate::report::{Table, create_file, filename_table, metadata_table};
use crate::text::TextExtractor;

pub enum DocumentOutcome {
    Matched(ExtractionRecord),
    Unmatched(ExtractionRecord),
    Failed,
}

impl DocumentOutcome {
    pub fn from_record(record: ExtractionRecord) -> Self {
        if record.has_matches() {
            DocumentOutcome::Matched(record)
        } else {
            DocumentOutcome::Unmatched(record)
        }
    }

    pub fn record(self, stats: &mut RunStats) -> Option<ExtractionRecord> {
        stats.documents += 1;
        match self {
            DocumentOutcome::Matched(record) => {
                stats.matched += 1;
                Some(record)
            }
            DocumentOutcome::Unmatched(record) => {
                stats.unmatched += 1;
                Some(record)
            }
            DocumentOutcome::Failed => {
                stats.failed += 1;
                None
            }
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStats {
    pub documents: usize,
    pub matched: usize,
    pub unmatched: usize,
    pub failed: usize,
    pub malformed_filenames: usize,
}

/// Regular files in `dir`, sorted by file name.
pub fn list_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|source| ScanError::InputDirectory {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Writes one filename-derived row per document. Never reads content.
pub fn write_filename_table<W: Write>(
    documents: &[PathBuf],
    table: &mut Table<W>,
    stats: &mut RunStats,
) -> Result<()> {
    for path in documents {
        let name = display_name(path);
        let parsed = parse_filename(&name);
        if parsed.malformed {
            stats.malformed_filenames += 1;
            tracing::warn!(path = %name, "file name does not follow 'id - headline - day - month - year - source'");
        }
        table.append_filename(&parsed.record)?;
    }
    Ok(())
}

/// Runs extraction, matching and assembly for a single document.
pub fn process_document(extractor: &dyn TextExtractor, path: &Path, keywords: &KeywordSet) -> DocumentOutcome {
    let name = display_name(path);
    let text = match extractor.extract(path) {
        Ok(text) => text,
        Err(e) => {
            tracing::error!(path = %name, error = %crate::unpack_error(&e), "failed to extract document text");
            return DocumentOutcome::Failed;
        }
    };

    let record = assemble(&text, &name, keywords);
    tracing::debug!(
        path = %record.path,
        paragraphs = %record.paragraphs,
        words = %record.words,
        keywords = %record.keywords,
        source = %record.who_wrote_the_piece,
        subject = %record.subject,
        "assembled record"
    );
    DocumentOutcome::from_record(record)
}

/// Extracts, matches and assembles one document and pairs the result with
/// its filename row. Unlike the batch, extraction failure is returned.
pub fn scan_document(extractor: &dyn TextExtractor, path: &Path, keywords: &KeywordSet) -> Result<DocumentReport> {
    let name = display_name(path);
    let text = extractor.extract(path)?;
    let parsed = parse_filename(&name);
    Ok(DocumentReport {
        filename: parsed.record,
        malformed_filename: parsed.malformed,
        extraction: assemble(&text, &name, keywords),
    })
}

/// Appends a metadata row for each document that could be read. Documents
/// whose text cannot be extracted are logged and skipped.
pub fn write_metadata_table<W: Write>(
    documents: &[PathBuf],
    extractor: &dyn TextExtractor,
    keywords: &KeywordSet,
    table: &mut Table<W>,
    stats: &mut RunStats,
) -> Result<()> {
    for path in documents {
        if let Some(record) = process_document(extractor, path, keywords).record(stats) {
            table.append_extraction(&record)?;
        }
    }
    Ok(())
}

/// Where a batch reads documents from and writes its two tables to.
#[derive(Debug, Clone)]
pub struct BatchPaths {
    pub input_dir: PathBuf,
    pub filename_table: PathBuf,
    pub metadata_table: PathBuf,
}

/// Runs a whole batch. The filename table is complete before any document
/// text is extracted. Per-document failures never abort the batch.
pub fn run_batch(paths: &BatchPaths, extractor: &dyn TextExtractor, keywords: &KeywordSet) -> Result<RunStats> {
    let documents = list_documents(&paths.input_dir)?;
    tracing::info!(input = ?paths.input_dir, documents = documents.len(), "scanning documents");

    let mut stats = RunStats::default();

    let mut filenames = filename_table(create_file(&paths.filename_table)?)?;
    write_filename_table(&documents, &mut filenames, &mut stats)?;
    filenames.finish()?;
    tracing::info!(table = ?paths.filename_table, "wrote filename table");

    let mut metadata = metadata_table(create_file(&paths.metadata_table)?)?;
    write_metadata_table(&documents, extractor, keywords, &mut metadata, &mut stats)?;
    metadata.finish()?;

    tracing::info!(
        table = ?paths.metadata_table,
        documents = stats.documents,
        matched = stats.matched,
        unmatched = stats.unmatched,
        failed = stats.failed,
        malformed_filenames = stats.malformed_filenames,
        "batch complete"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapExtractor(HashMap<String, String>);

    impl TextExtractor for MapExtractor {
        fn extract(&self, path: &Path) -> Result<String> {
            let name = display_name(path);
            self.0.get(&name).cloned().ok_or_else(|| ScanError::Extraction {
                path: path.to_path_buf(),
                message: "unreadable".to_string(),
            })
        }
    }

    #[test]
    fn test_outcome_counts() {
        let mut stats = RunStats::default();
        let matched = ExtractionRecord {
            keywords: "sexism".to_string(),
            ..Default::default()
        };
        assert!(DocumentOutcome::from_record(matched).record(&mut stats).is_some());
        assert!(DocumentOutcome::from_record(ExtractionRecord::default()).record(&mut stats).is_some());
        assert!(DocumentOutcome::Failed.record(&mut stats).is_none());
        assert_eq!(
            stats,
            RunStats {
                documents: 3,
                matched: 1,
                unmatched: 1,
                failed: 1,
                malformed_filenames: 0,
            }
        );
    }

    #[test]
    fn test_failed_document_skipped_others_written() {
        let extractor = MapExtractor(HashMap::from([(
            "b.pdf".to_string(),
            "Feminism in the boardroom.".to_string(),
        )]));
        let docs = vec![PathBuf::from("in/a.pdf"), PathBuf::from("in/b.pdf")];
        let mut table = metadata_table(Vec::new()).unwrap();
        let mut stats = RunStats::default();

        write_metadata_table(&docs, &extractor, &KeywordSet::default(), &mut table, &mut stats).unwrap();

        assert_eq!(table.rows(), 1);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.matched, 1);
        let out = String::from_utf8(table.finish().unwrap()).unwrap();
        assert!(out.lines().nth(1).unwrap().ends_with("feminism,b.pdf"));
    }

    #[test]
    fn test_filename_table_counts_malformed() {
        let docs = vec![
            PathBuf::from("x/1 - Story - 01 - Jan - 2020 - AP.pdf"),
            PathBuf::from("x/readme.txt"),
        ];
        let mut table = filename_table(Vec::new()).unwrap();
        let mut stats = RunStats::default();
        write_filename_table(&docs, &mut table, &mut stats).unwrap();
        assert_eq!(table.rows(), 2);
        assert_eq!(stats.malformed_filenames, 1);
    }

    #[test]
    fn test_missing_input_directory() {
        let err = list_documents(Path::new("/no/such/dataset")).unwrap_err();
        assert!(matches!(err, ScanError::InputDirectory { .. }));
    }

    #[test]
    fn test_scan_document_pairs_filename_and_extraction() {
        let name = "7 - Pay Gap Report - 05 - May - 2021 - Reuters.pdf";
        let extractor = MapExtractor(HashMap::from([(
            name.to_string(),
            "Closing the gender pay gap.\n\nSource: Reuters Staff\nLondon".to_string(),
        )]));

        let report = scan_document(&extractor, &Path::new("in").join(name), &KeywordSet::default()).unwrap();

        assert!(!report.malformed_filename);
        assert_eq!(report.filename.identifier, "7");
        assert_eq!(report.filename.date, "05-May-2021");
        assert_eq!(report.extraction.keywords, "gender pay gap");
        assert_eq!(report.extraction.who_wrote_the_piece, "Reuters Staff");
        assert_eq!(report.extraction.path, name);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["filename"]["source"], "Reuters");
        assert_eq!(json["extraction"]["paragraphs"], "1");
        assert_eq!(json["malformed_filename"], false);
    }

    #[test]
    fn test_scan_document_returns_extraction_error() {
        let extractor = MapExtractor(HashMap::new());
        let err = scan_document(&extractor, Path::new("in/gone.pdf"), &KeywordSet::default()).unwrap_err();
        assert!(matches!(err, ScanError::Extraction { .. }));
    }

    /// Reads each input file as already-extracted text; files starting with
    /// `%BROKEN` fail like an unreadable PDF.
    struct PlainTextExtractor;

    impl TextExtractor for PlainTextExtractor {
        fn extract(&self, path: &Path) -> Result<String> {
            let text = fs::read_to_string(path)?;
            if text.starts_with("%BROKEN") {
                return Err(ScanError::Extraction {
                    path: path.to_path_buf(),
                    message: "not extractable".to_string(),
                });
            }
            Ok(text)
        }
    }

    fn batch_dir(dir: &Path) -> BatchPaths {
        let input = dir.join("20");
        fs::create_dir(&input).unwrap();
        fs::create_dir(input.join("nested")).unwrap();

        fs::write(
            input.join("1 - Harassment Inquiry - 01 - Jan - 2020 - Reuters.pdf"),
            "Intro paragraph.\n\nThis report discusses sexual harassment claims.\n\nSOURCE Jane Doe\n\nSubjects: Workplace Safety, Gender",
        )
        .unwrap();
        fs::write(
            input.join("2 - Earnings - 02 - Feb - 2020 - PRN.pdf"),
            "Revenue grew.\n\nSource: Company Press Office\nNew York",
        )
        .unwrap();
        fs::write(input.join("3 - Broken - 03 - Mar - 2020 - AP.pdf"), "%BROKEN").unwrap();
        fs::write(input.join("stray.pdf"), "gender-pay-gap-update").unwrap();

        BatchPaths {
            input_dir: input,
            filename_table: dir.join("20_new.csv"),
            metadata_table: dir.join("20_tmp.csv"),
        }
    }

    #[test]
    fn test_batch_writes_both_tables() {
        let dir = tempfile::tempdir().unwrap();
        let paths = batch_dir(dir.path());

        let stats = run_batch(&paths, &PlainTextExtractor, &KeywordSet::default()).unwrap();
        assert_eq!(
            stats,
            RunStats {
                documents: 4,
                matched: 2,
                unmatched: 1,
                failed: 1,
                malformed_filenames: 1,
            }
        );

        let filenames = fs::read_to_string(&paths.filename_table).unwrap();
        assert_eq!(
            filenames.lines().collect::<Vec<_>>(),
            vec![
                "identifier,headline,date,source",
                "1,Harassment Inquiry,01-Jan-2020,Reuters",
                "2,Earnings,02-Feb-2020,PRN",
                "3,Broken,03-Mar-2020,AP",
                "stray.pdf,,,",
            ]
        );

        let metadata = fs::read_to_string(&paths.metadata_table).unwrap();
        assert_eq!(
            metadata.lines().collect::<Vec<_>>(),
            vec![
                "who_wrote_the_piece,subject,relevant_text,paragraphs,words,keywords,path",
                "Jane Doe,\"Workplace Safety, Gender\",This report discusses sexual harassment claims.,1,6,sexual harassment,1 - Harassment Inquiry - 01 - Jan - 2020 - Reuters.pdf",
                "Company Press Office,,,,,,2 - Earnings - 02 - Feb - 2020 - PRN.pdf",
                ",,gender-pay-gap-update,1,1,gender-pay-gap,stray.pdf",
            ]
        );
    }

    #[test]
    fn test_rerun_truncates_tables() {
        let dir = tempfile::tempdir().unwrap();
        let paths = batch_dir(dir.path());

        run_batch(&paths, &PlainTextExtractor, &KeywordSet::default()).unwrap();
        run_batch(&paths, &PlainTextExtractor, &KeywordSet::default()).unwrap();

        let metadata = fs::read_to_string(&paths.metadata_table).unwrap();
        let headers = metadata.lines().filter(|l| l.starts_with("who_wrote_the_piece")).count();
        assert_eq!(headers, 1);
        assert_eq!(metadata.lines().count(), 4);
    }

    #[test]
    fn test_missing_input_directory_aborts_before_tables() {
        let dir = tempfile::tempdir().unwrap();
        let paths = BatchPaths {
            input_dir: dir.path().join("missing"),
            filename_table: dir.path().join("missing_new.csv"),
            metadata_table: dir.path().join("missing_tmp.csv"),
        };

        let err = run_batch(&paths, &PlainTextExtractor, &KeywordSet::default()).unwrap_err();
        assert!(matches!(err, ScanError::InputDirectory { .. }));
        assert!(!paths.filename_table.exists());
    }
}
