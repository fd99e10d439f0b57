use chat_scraper::handlers::*;
use chat_scraper_core::aggregate::ParseErrorPolicy;
use chat_scraper_core::category::{Category, MatchMode};
use chat_scraper_core::error::ScrapeError;
use chat_scraper_core::report::ReportFormat;
use std::io::{Cursor, Write};
use tempfile::NamedTempFile;

const EXPORT: &str = "\
[05/03/2024, 18:20] Ana: look https://www.linkedin.com/in/ana?trk=abc
[05/03/2024, 18:21] Bo: nice
[05/03/2024, 18:22] Bo: https://youtube.com/watch?v=xyz and https://example.org/post
[05/03/2024, 18:23] Ana: https://www.instagram.com/p/1/?igsh=zz
";

fn chat_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file
}

fn options_for(file: &NamedTempFile) -> ListOptions {
    ListOptions::new(file.path().to_str().unwrap())
}

#[test]
fn test_open_source_missing_file() {
    let result = open_source("/definitely/not/here/chat.txt");
    match result {
        Err(ScrapeError::FileOpen { path, .. }) => {
            assert!(path.ends_with("chat.txt"));
        }
        Err(other) => panic!("expected FileOpen, got {}", other),
        Ok(_) => panic!("expected FileOpen error"),
    }
}

#[test]
fn test_open_source_error_names_path() {
    let err = open_source("/definitely/not/here/chat.txt").err().unwrap();
    assert!(err.to_string().contains("/definitely/not/here/chat.txt"));
}

#[test]
fn test_collect_links_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let options = ListOptions::new("export");
    let state = collect_links(Cursor::new(EXPORT), &options)?;

    assert_eq!(state.lines_read(), 4);
    assert_eq!(state.all().len(), 4);
    assert!(state.groups().is_none());
    assert!(state.all().iter().all(|u| u.query().is_none()));

    Ok(())
}

#[test]
fn test_collect_links_with_category_filter() -> Result<(), Box<dyn std::error::Error>> {
    let mut options = ListOptions::new("export");
    options.categories = "instagram, youtube,unknown".to_string();
    let state = collect_links(Cursor::new(EXPORT), &options)?;

    let shown: Vec<&str> = state.all().iter().map(|u| u.as_str()).collect();
    assert_eq!(
        shown,
        vec!["https://youtube.com/watch", "https://www.instagram.com/p/1/"]
    );
    assert_eq!(state.discovered().len(), 4);

    Ok(())
}

#[test]
fn test_collect_links_grouped() -> Result<(), Box<dyn std::error::Error>> {
    let mut options = ListOptions::new("export");
    options.grouped = true;
    let state = collect_links(Cursor::new(EXPORT), &options)?;

    let groups = state.groups().expect("grouped run should produce groups");
    assert_eq!(groups.get(Category::Linkedin).len(), 1);
    assert_eq!(groups.get(Category::Instagram).len(), 1);
    assert_eq!(groups.get(Category::Youtube).len(), 1);
    assert_eq!(groups.get(Category::General).len(), 1);

    Ok(())
}

#[test]
fn test_collect_links_aborts_on_invalid_url() {
    let options = ListOptions::new("broken-export");
    let err = collect_links(Cursor::new("ok\nsee https://\n"), &options).unwrap_err();

    let message = format!("{:#}", err);
    assert!(message.contains("scanning links from broken-export"));
    assert!(message.contains("line 2"));
    assert!(message.contains("https://"));
}

#[test]
fn test_collect_links_skip_invalid() -> Result<(), Box<dyn std::error::Error>> {
    let mut options = ListOptions::new("broken-export");
    options.on_invalid_url = ParseErrorPolicy::Skip;
    let state = collect_links(Cursor::new("see https:// and https://ok.example/\n"), &options)?;

    assert_eq!(state.skipped(), 1);
    assert_eq!(state.all().len(), 1);

    Ok(())
}

#[test]
fn test_collect_links_domain_suffix_mode() -> Result<(), Box<dyn std::error::Error>> {
    let mut options = ListOptions::new("export");
    options.match_mode = MatchMode::DomainSuffix;
    options.categories = "linkedin".to_string();
    let input = "https://lnkd.in/a https://notlinkedin.example.com/b https://www.linkedin.com/c\n";
    let state = collect_links(Cursor::new(input), &options)?;

    let shown: Vec<&str> = state.all().iter().map(|u| u.as_str()).collect();
    assert_eq!(shown, vec!["https://lnkd.in/a", "https://www.linkedin.com/c"]);

    Ok(())
}

#[test]
fn test_run_links_list_from_file() -> Result<(), Box<dyn std::error::Error>> {
    let file = chat_file(EXPORT);
    let report = run_links_list(&options_for(&file))?;

    assert!(report.starts_with("OK: 4 lines read\n"));
    assert!(report.contains("All discovered: 4\n"));
    assert!(report.contains("Links showed: 4\n"));
    assert!(report.contains("\t1: https://www.linkedin.com/in/ana\n"));
    assert!(report.contains("\t4: https://www.instagram.com/p/1/\n"));

    Ok(())
}

#[test]
fn test_run_links_list_grouped_from_file() -> Result<(), Box<dyn std::error::Error>> {
    let file = chat_file("https://example.com/only\n");
    let mut options = options_for(&file);
    options.grouped = true;
    let report = run_links_list(&options)?;

    assert!(report.contains("\n LINKEDIN\n\n INSTAGRAM\n\n YOUTUBE\n\n GENERAL\n"));
    assert!(report.ends_with("\t1: https://example.com/only\n"));

    Ok(())
}

#[test]
fn test_run_links_list_json() -> Result<(), Box<dyn std::error::Error>> {
    let file = chat_file(EXPORT);
    let mut options = options_for(&file);
    options.format = ReportFormat::Json;
    let report = run_links_list(&options)?;

    assert!(report.contains("\"lines_read\": 4"));
    assert!(report.contains("\"links\""));

    Ok(())
}

#[test]
fn test_run_links_list_missing_file() {
    let options = ListOptions::new("/definitely/not/here/chat.txt");
    let err = run_links_list(&options).unwrap_err();
    let message = format!("{:#}", err);

    assert!(message.starts_with("opening input"));
    assert!(message.contains("/definitely/not/here/chat.txt"));
}

#[test]
fn test_run_links_list_empty_file() -> Result<(), Box<dyn std::error::Error>> {
    let file = chat_file("");
    let report = run_links_list(&options_for(&file))?;

    assert_eq!(report, "OK: 0 lines read\nAll discovered: 0\nLinks showed: 0\n");

    Ok(())
}

#[test]
fn test_execute_links_list_prints_report() {
    let file = chat_file("https://example.com/only?x=1\n");
    let (mut out, mut err) = (Vec::new(), Vec::new());

    let code = execute_links_list(&options_for(&file), &mut out, &mut err);

    assert_eq!(code, 0);
    assert!(err.is_empty());
    let stdout = String::from_utf8(out).unwrap();
    assert!(stdout.ends_with("\t1: https://example.com/only\n"));
}

#[test]
fn test_execute_links_list_missing_file_exits_non_zero() {
    let options = ListOptions::new("/definitely/not/here/chat.txt");
    let (mut out, mut err) = (Vec::new(), Vec::new());

    let code = execute_links_list(&options, &mut out, &mut err);

    assert_eq!(code, 1);
    assert!(out.is_empty());
    let stderr = String::from_utf8(err).unwrap();
    assert!(stderr.contains("✗"));
    assert!(stderr.contains("opening input"));
    assert!(stderr.contains("/definitely/not/here/chat.txt"));
}

#[test]
fn test_execute_links_list_invalid_url_exits_non_zero() {
    let file = chat_file("https://ok.example/\nsee https://\n");
    let (mut out, mut err) = (Vec::new(), Vec::new());

    let code = execute_links_list(&options_for(&file), &mut out, &mut err);

    assert_eq!(code, 1);
    assert!(out.is_empty());
    let stderr = String::from_utf8(err).unwrap();
    assert!(stderr.contains("✗"));
    assert!(stderr.contains("line 2"));
}

#[test]
fn test_execute_links_list_saves_to_output() -> Result<(), Box<dyn std::error::Error>> {
    let file = chat_file("https://youtube.com/watch?v=1\n");
    let dir = tempfile::tempdir()?;
    let target = dir.path().join("links.txt");
    let mut options = options_for(&file);
    options.output = Some(target.clone());
    let (mut out, mut err) = (Vec::new(), Vec::new());

    let code = execute_links_list(&options, &mut out, &mut err);

    assert_eq!(code, 0);
    assert!(String::from_utf8(out)?.contains("Report saved to"));
    let saved = std::fs::read_to_string(&target)?;
    assert!(saved.contains("\t1: https://youtube.com/watch\n"));

    Ok(())
}

#[test]
fn test_execute_links_list_unwritable_output_exits_non_zero() {
    let file = chat_file("https://youtube.com/watch\n");
    let mut options = options_for(&file);
    options.output = Some("/definitely/not/here/links.txt".into());
    let (mut out, mut err) = (Vec::new(), Vec::new());

    let code = execute_links_list(&options, &mut out, &mut err);

    assert_eq!(code, 1);
    let stderr = String::from_utf8(err).unwrap();
    assert!(stderr.contains("✗"));
    assert!(stderr.contains("writing report to /definitely/not/here/links.txt"));
}
