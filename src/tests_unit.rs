#[cfg(test)]
mod tests {
    use crate::assemble::{assemble_to_vec, Sections};
    use crate::config::{DelimiterStyle, HeaderSource, Settings};
    use crate::fs_walk::{expand_paths, list_dir_files};
    use crate::io::OutputIo;
    use crate::lists::{parse_codes_mapping, read_work_dirs};
    use crate::resolve::{resolve_codes, resolve_path};
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::tempdir;

    fn settings(cwd: &std::path::Path) -> Settings { Settings::new(DelimiterStyle::Block, cwd.to_path_buf()) }

    #[test]
    fn first_work_dir_wins() {
        let td = tempdir().unwrap();
        let (a, b) = (td.path().join("A"), td.path().join("B"));
        fs::create_dir(&a).unwrap(); fs::create_dir(&b).unwrap();
        fs::write(a.join("x.txt"), "from a").unwrap();
        fs::write(b.join("x.txt"), "from b").unwrap();
        assert_eq!(resolve_path(Path::new("x.txt"), &[a.clone(), b.clone()], td.path()), a.join("x.txt"));
        assert_eq!(resolve_path(Path::new("x"), &[b.clone(), a], td.path()), b.join("x.txt"));
    }

    #[test]
    fn txt_only_tried_without_extension() {
        let td = tempdir().unwrap();
        fs::write(td.path().join("notes.md.txt"), "x").unwrap();
        let bases = vec![td.path().to_path_buf()];
        assert_eq!(resolve_path(Path::new("notes.md"), &bases, td.path()), td.path().join("notes.md"));
    }

    #[test]
    fn absolute_existing_path_is_kept() {
        let td = tempdir().unwrap();
        let f = td.path().join("abs.txt");
        fs::write(&f, "x").unwrap();
        let other = tempdir().unwrap();
        assert_eq!(resolve_path(&f, &[other.path().to_path_buf()], other.path()), f);
    }

    #[test]
    fn unresolved_falls_back_to_cwd_guess() {
        let td = tempdir().unwrap();
        let cwd = tempdir().unwrap();
        let bases = vec![td.path().to_path_buf()];
        assert_eq!(resolve_path(Path::new("ghost"), &bases, cwd.path()), cwd.path().join("ghost"));
        fs::write(cwd.path().join("ghost.txt"), "boo").unwrap();
        assert_eq!(resolve_path(Path::new("ghost"), &bases, cwd.path()), cwd.path().join("ghost.txt"));
    }

    #[test]
    fn dir_listing_is_sorted_and_flat() {
        let td = tempdir().unwrap();
        for n in ["b.txt", "a.txt", "c.md"] { fs::write(td.path().join(n), n).unwrap(); }
        fs::create_dir(td.path().join("sub")).unwrap();
        fs::write(td.path().join("sub/z.txt"), "z").unwrap();
        let names: Vec<String> = list_dir_files(td.path()).unwrap().iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string()).collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "c.md"]);
    }

    #[test]
    fn expand_paths_keeps_argument_order() {
        let td = tempdir().unwrap();
        fs::create_dir(td.path().join("dir")).unwrap();
        fs::write(td.path().join("dir/2.txt"), "2").unwrap();
        fs::write(td.path().join("dir/1.txt"), "1").unwrap();
        let args: Vec<PathBuf> = ["first.txt", "dir", "last"].iter().map(PathBuf::from).collect();
        let out = expand_paths(&args, td.path()).unwrap();
        assert_eq!(out.len(), 4);
        assert_eq!(out[0], Path::new("first.txt"));
        assert!(out[1].ends_with("1.txt"));
        assert!(out[2].ends_with("2.txt"));
        assert_eq!(out[3], Path::new("last"));
    }

    #[test]
    fn mapping_last_occurrence_wins() {
        let m = parse_codes_mapping("K1 a.txt\n\nK2   dir/with space.txt\nK1 b.txt\nlonely\n");
        assert_eq!(m.get("K1").map(String::as_str), Some("b.txt"));
        assert_eq!(m.get("K2").map(String::as_str), Some("dir/with space.txt"));
        assert!(!m.contains_key("lonely"));
    }

    #[test]
    fn missing_codes_are_all_reported() {
        let m = parse_codes_mapping("K1 a.txt\n");
        let codes: Vec<String> = ["K1", "K2", "K3"].iter().map(|s| s.to_string()).collect();
        let err = resolve_codes(&codes, &m).unwrap_err().to_string();
        assert!(err.contains("K2") && err.contains("K3"));
        assert!(!err.contains("K1"));
        let ok = resolve_codes(&codes[..1], &m).unwrap();
        assert_eq!(ok, vec![PathBuf::from("a.txt")]);
    }

    #[test]
    fn work_dirs_skip_blank_and_missing() {
        let td = tempdir().unwrap();
        fs::create_dir(td.path().join("real")).unwrap();
        let work = td.path().join("work.txt");
        fs::write(&work, "\nreal\n  \nnope\n").unwrap();
        let dirs = read_work_dirs(&work, td.path()).unwrap();
        assert_eq!(dirs, vec![td.path().join("real")]);
        assert!(read_work_dirs(&td.path().join("absent.txt"), td.path()).unwrap().is_empty());
    }

    #[test]
    fn single_file_round_trip() {
        let td = tempdir().unwrap();
        let f = td.path().join("f.txt");
        fs::write(&f, "hello").unwrap();
        let s = settings(td.path());
        let out = assemble_to_vec(&s, &[f], &Sections { header: None, append_error_note: false, request: None }).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "<<<BLOCK_START>>> f.txt\nhello\n<<<BLOCK_END>>> f.txt\n\n");
        let body: Vec<&str> = text.lines().filter(|l| !l.starts_with("<<<") && !l.is_empty()).collect();
        assert_eq!(body, vec!["hello"]);
    }

    #[test]
    fn header_note_request_then_blocks() {
        let td = tempdir().unwrap();
        let req = td.path().join("request.txt");
        fs::write(&req, "please fix").unwrap();
        let header = HeaderSource::Literal("build failed".into());
        let s = settings(td.path());
        let missing = td.path().join("gone.txt");
        let out = assemble_to_vec(&s, &[missing.clone()], &Sections { header: Some(&header), append_error_note: true, request: Some(&req) }).unwrap();
        let text = String::from_utf8(out).unwrap();
        let h = text.find("build failed").unwrap();
        let note = text.find(s.error_note).unwrap();
        let r = text.find("<<<BLOCK_START>>> REQUEST_BODY").unwrap();
        let b = text.find("<<<BLOCK_START>>> gone.txt").unwrap();
        assert!(text.starts_with("<<<BLOCK_START>>> REQUEST_HEADER\n"));
        assert!(h < note && note < r && r < b);
        assert!(text.contains(&format!("[Warning: file '{}' not found]", missing.display())));
    }

    #[test]
    fn file_style_uses_legacy_markers() {
        let td = tempdir().unwrap();
        let f = td.path().join("one.txt");
        fs::write(&f, "1").unwrap();
        let s = Settings::new(DelimiterStyle::File, td.path().to_path_buf());
        let out = assemble_to_vec(&s, &[f], &Sections { header: None, append_error_note: false, request: None }).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "<<<FILE_START>>> one.txt\n1\n<<<FILE_END>>> one.txt\n\n");
    }

    #[test]
    fn header_classification() {
        let td = tempdir().unwrap();
        fs::write(td.path().join("hdr.txt"), "from file").unwrap();
        let s = settings(td.path());
        let bases = vec![td.path().to_path_buf()];
        assert_eq!(HeaderSource::classify("hdr", &bases, &s), HeaderSource::File(td.path().join("hdr.txt")));
        assert_eq!(HeaderSource::classify("build failed", &bases, &s), HeaderSource::Literal("build failed".into()));
        assert_eq!(HeaderSource::File(td.path().join("hdr.txt")).load().unwrap(), b"from file");
    }

    #[test]
    fn atomic_write_overwrites() {
        let td = tempdir().unwrap();
        let out: PathBuf = td.path().join("nested/OUTPUT.txt");
        OutputIo::default().atomic_write(&out, b"first").unwrap();
        OutputIo::default().atomic_write(&out, b"second").unwrap();
        assert_eq!(fs::read(&out).unwrap(), b"second");
        assert!(!td.path().join("nested/OUTPUT.txt.tmp").exists());
    }

    #[test]
    fn empty_identifier_skips_txt_inference() {
        let td = tempdir().unwrap();
        fs::write(td.path().join(".txt"), "hidden").unwrap();
        let bases = vec![td.path().to_path_buf()];
        let p = resolve_path(Path::new(""), &bases, td.path());
        assert!(!p.is_file());
        let s = settings(td.path());
        assert_eq!(HeaderSource::classify("", &bases, &s), HeaderSource::Literal(String::new()));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_names_survive_expansion() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;
        let td = tempdir().unwrap();
        let dir = td.path().join("d");
        fs::create_dir(&dir).unwrap();
        let name = OsStr::from_bytes(b"\xffbad.txt");
        if fs::write(dir.join(name), "raw bytes").is_err() { return; }
        let raws = expand_paths(&[PathBuf::from("d")], td.path()).unwrap();
        assert_eq!(raws, vec![dir.join(name)]);
        let resolved = resolve_path(&raws[0], &[td.path().to_path_buf()], td.path());
        assert_eq!(resolved, dir.join(name));
        let s = settings(td.path());
        let out = assemble_to_vec(&s, &[resolved], &Sections { header: None, append_error_note: false, request: None }).unwrap();
        assert!(String::from_utf8_lossy(&out).contains("\nraw bytes\n"));
    }
}
