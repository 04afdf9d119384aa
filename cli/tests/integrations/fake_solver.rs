use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

const SCRIPTS: &[(&str, &str)] = &[
    (
        "sat.sh",
        r#"if [ -n "$ARGS_FILE" ]; then echo "$@" > "$ARGS_FILE"; fi
echo '{"Result": "SATISFIABLE", "Call": [{"Witnesses": [{"Value": ["node(1)", "color(\"red\")"]}]}]}'
exit 10"#,
    ),
    (
        "optimum.sh",
        r#"echo '{"Result": "OPTIMUM FOUND", "Call": [{"Witnesses": [{"Value": ["pick(3)"], "Costs": [7]}, {"Value": ["pick(1)"], "Costs": [2]}]}]}'
exit 30"#,
    ),
    (
        "unsat.sh",
        r#"echo '{"Result": "UNSATISFIABLE", "Call": [{"Witnesses": []}]}'
exit 20"#,
    ),
    (
        "syntax_error.sh",
        r#"echo '<block>:1:3-4: error: syntax error, unexpected .' >&2
exit 65"#,
    ),
    (
        "ground.sh",
        r#"printf '1 2 0 0\n0\n2 node(1)\n3 node(2)\n4 edge(1,2)\n0\nB+\n0\nB-\n1\n0\n1\n'
exit 0"#,
    ),
    ("slow.sh", "exec sleep 30"),
];

/// Directory of shell scripts that stand in for clingo, written once per test run
pub fn scripts() -> &'static Path {
    static DIR: OnceLock<PathBuf> = OnceLock::new();
    DIR.get_or_init(|| {
        let dir =
            std::env::temp_dir().join(format!("aspire-cli-fake-solvers-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        for (name, body) in SCRIPTS {
            let path = dir.join(name);
            fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        }
        dir
    })
}

pub fn script(name: &str) -> PathBuf {
    scripts().join(name)
}
