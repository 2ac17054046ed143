use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn logtrail(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_logtrail"))
        .args(args)
        .env_remove("LOGTRAIL_LOG")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run logtrail")
}

fn write_file(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, text).unwrap();
    path
}

fn stdout(output: &Output) -> &str {
    std::str::from_utf8(&output.stdout).unwrap()
}

fn stderr(output: &Output) -> &str {
    std::str::from_utf8(&output.stderr).unwrap()
}

#[test]
fn insert_prints_the_edited_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "app.js", "const x = compute();\n");

    let output = logtrail(&["insert", path.to_str().unwrap(), "--at", "1:7"]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "const x = compute();\nconsole.log('x', x);\n\n");
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "const x = compute();\n");
}

#[test]
fn insert_writes_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let text = "function greet(name) {\n    return name;\n}\n";
    let path = write_file(dir.path(), "greet.mjs", text);

    let output = logtrail(&["insert", path.to_str().unwrap(), "--at", "2:12", "--write"]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "");
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "function greet(name) {\n    return name;\n    console.log('greet -> name', name);\n\n}\n"
    );
}

#[test]
fn insert_with_several_cursors_and_options() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "app.js", "const a = 1;\nconst b = 2;\n");

    let output = logtrail(&[
        "insert",
        path.to_str().unwrap(),
        "--at",
        "1:7",
        "--at",
        "2:7",
        "--log-function",
        "debug",
    ]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "const a = 1;\nconst b = 2;\ndebug('b', b);\n\ndebug('a', a);\n\n"
    );
}

#[test]
fn nothing_to_log() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "app.js", "const x = 1;\n");

    let output = logtrail(&["insert", path.to_str().unwrap(), "--at", "1:11"]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "const x = 1;\n");
    assert!(stderr(&output).contains("nothing to log"));
}

#[test]
fn vue_component() {
    let dir = tempfile::tempdir().unwrap();
    let text = "<template>\n  <p>{{ msg }}</p>\n</template>\n<script>\nconst msg = 'hi';\n</script>\n";
    let path = write_file(dir.path(), "Card.vue", text);

    let output = logtrail(&["insert", path.to_str().unwrap(), "--at", "5:7"]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "<template>\n  <p>{{ msg }}</p>\n</template>\n<script>\nconst msg = 'hi';\nconsole.log('msg', msg);\n\n</script>\n"
    );
}

#[test]
fn unsupported_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "notes.txt", "const x = 1;\n");

    let output = logtrail(&["insert", path.to_str().unwrap(), "--at", "1:7"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("is not a JavaScript or Vue file"), "{}", stderr(&output));
}

#[test]
fn invalid_cursor() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "app.js", "const x = 1;\n");

    let output = logtrail(&["insert", path.to_str().unwrap(), "--at", "0:1"]);
    assert!(!output.status.success());

    let output = logtrail(&["insert", path.to_str().unwrap(), "--at", "7:1"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("line 7 is past the end of the file"), "{}", stderr(&output));
}

#[test]
fn preview_shows_the_trail() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "app.js", "class Foo {\n  bar() {\n    let y = 1;\n  }\n}\n");

    let output = logtrail(&["preview", path.to_str().unwrap(), "--at", "3:9"]);

    assert!(output.status.success(), "{}", stderr(&output));
    let stdout = stdout(&output);
    assert!(stdout.contains("insert `console.log('Foo -> bar -> y', y);`"), "{stdout}");
    assert!(stdout.contains("goes below line 3 with 4 spaces of indentation"), "{stdout}");
}
