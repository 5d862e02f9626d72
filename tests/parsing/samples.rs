#[cfg(test)]
mod samples {
    use std::fs;
    use std::path::Path;

    use docket::language::*;
    use docket::parsing;

    #[test]
    fn ensure_samples_parse() {
        let dir = Path::new("tests/samples/");

        assert!(dir.exists(), "samples directory missing");

        let entries = fs::read_dir(dir).expect("Failed to read samples directory");

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.expect("Failed to read directory entry");
            let path = entry.path();

            if path
                .extension()
                .and_then(|s| s.to_str())
                == Some("dockerfile")
            {
                files.push(path);
            }
        }

        assert!(!files.is_empty(), "No .dockerfile files found in samples directory");

        let mut failures = Vec::new();

        for file in &files {
            let content = parsing::load(&file)
                .unwrap_or_else(|e| panic!("Failed to load file {:?}: {:?}", file, e));

            let document = parsing::parse(&content);

            if document
                .froms()
                .is_empty()
            {
                println!("File {:?} has no stages", file);
                failures.push(file.clone());
                continue;
            }

            for instruction in document.instructions() {
                if instruction.kind() == Keyword::Unknown {
                    println!(
                        "File {:?} has unrecognized instruction {}",
                        file,
                        instruction.keyword()
                    );
                    failures.push(file.clone());
                }
                for argument in instruction.arguments() {
                    if !instruction
                        .range()
                        .contains_range(&argument.range())
                    {
                        println!("File {:?} has argument outside its instruction", file);
                        failures.push(file.clone());
                    }
                }
            }
        }

        if !failures.is_empty() {
            panic!(
                "Sample files should parse cleanly, but {} problems were found",
                failures.len()
            );
        }
    }

    #[test]
    fn missing_file_is_reported() {
        let result = parsing::load(Path::new("tests/samples/nonexistent.dockerfile"));

        match result {
            Err(error) => assert_eq!(error.problem, "File not found"),
            Ok(_) => panic!("loading a missing file should fail"),
        }
    }
}
