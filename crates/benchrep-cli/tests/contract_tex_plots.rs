use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn benchrep() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("benchrep").unwrap()
}

fn write_experiment(root: &Path, name: &str, contents: &str) {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("query-times.csv"), contents).unwrap();
}

const EXP_A: &str = "\
name;id;results;time;error;httpRequests;timestamps
q1;0;5;100;false;3;20 60 100
q1;1;5;200;false;5;40 80 200
q2;0;7;50;false;2;10 30 50
";

const EXP_B: &str = "\
name;id;results;time;error;httpRequests;timestamps
q1;0;5;300;false;7;100 200 300
q2;0;6;20;false;1;5 10 20
";

#[test]
fn tex_query_writes_plot_data_and_tex() {
    let temp = tempdir().unwrap();
    write_experiment(temp.path(), "exp-a", EXP_A);
    write_experiment(temp.path(), "exp-b", EXP_B);

    benchrep()
        .current_dir(temp.path())
        .args(["tex", "query", "exp-a", "exp-b"])
        .assert()
        .success();

    // Zero-width first-arrival whiskers collapse to NaN so pgfplots skips
    // them instead of drawing a degenerate bar.
    let data = fs::read_to_string(temp.path().join("plot_queries_data.csv")).unwrap();
    assert_eq!(
        data,
        "\
query;0-mean;0-minus;0-plus;0-first-mean;0-first-minus;0-first-plus;\
1-mean;1-minus;1-plus;1-first-mean;1-first-minus;1-first-plus
q1;150;50;50;30;10;10;300;0;0;100;NaN;NaN
q2;50;0;0;10;NaN;NaN;20;0;0;5;NaN;NaN
"
    );

    let tex = fs::read_to_string(temp.path().join("plot_queries_data.tex")).unwrap();
    assert!(tex.contains("symbolic x coords={q1,q2}"), "{tex}");
    assert!(tex.contains("\\legend{exp-a,exp-b}"), "{tex}");
    assert!(tex.contains("cycle list/Spectral-3,"), "{tex}");
    // Time metric: bar heights are scaled to seconds in the plot.
    assert!(tex.contains("y expr=(\\thisrow{0-mean} / 1000)"), "{tex}");
    assert!(tex.contains("mark=star"), "{tex}");
    // No --max-y given: the placeholder stays behind as a TeX comment.
    assert!(tex.contains("%Y_MAX%"), "{tex}");
}

#[test]
fn tex_query_log_axis_and_max_y() {
    let temp = tempdir().unwrap();
    write_experiment(temp.path(), "exp-a", EXP_A);

    benchrep()
        .current_dir(temp.path())
        .args(["tex", "query", "exp-a", "--log-y", "--max-y", "5"])
        .assert()
        .success();

    let tex = fs::read_to_string(temp.path().join("plot_queries_data.tex")).unwrap();
    assert!(
        tex.contains("ymin=0.000001,ymode=log,log origin=infty,log basis y={10},"),
        "{tex}"
    );
    assert!(tex.contains(" / 1000)+1e-5"), "{tex}");
    assert!(tex.contains("ymax=5,"), "{tex}");
}

#[test]
fn tex_query_relative_rescales_and_drops_the_ylabel() {
    let temp = tempdir().unwrap();
    write_experiment(temp.path(), "exp-a", EXP_A);
    write_experiment(temp.path(), "exp-b", EXP_B);

    benchrep()
        .current_dir(temp.path())
        .args(["tex", "query", "exp-a", "exp-b", "--relative"])
        .assert()
        .success();

    let data = fs::read_to_string(temp.path().join("plot_queries_data.csv")).unwrap();
    // q1 max across experiments is 300, q2 max is 50.
    assert!(data.contains("q1;0.5;"), "{data}");
    assert!(data.contains("q2;1;"), "{data}");

    let tex = fs::read_to_string(temp.path().join("plot_queries_data.tex")).unwrap();
    assert!(tex.contains("ylabel={},"), "{tex}");
    // Relative values are plotted as-is, without the seconds scaling.
    assert!(tex.contains("y expr=(\\thisrow{0-mean}),"), "{tex}");
}

#[test]
fn tex_query_http_requests_metric_changes_the_ylabel() {
    let temp = tempdir().unwrap();
    write_experiment(temp.path(), "exp-a", EXP_A);

    benchrep()
        .current_dir(temp.path())
        .args(["tex", "query", "exp-a", "--metric", "http-requests"])
        .assert()
        .success();

    let data = fs::read_to_string(temp.path().join("plot_queries_data.csv")).unwrap();
    // No first-arrival columns for the request metric.
    assert_eq!(
        data,
        "query;0-mean;0-minus;0-plus\nq1;4;1;1\nq2;2;0;0\n"
    );

    let tex = fs::read_to_string(temp.path().join("plot_queries_data.tex")).unwrap();
    assert!(tex.contains("ylabel={HTTP Requests},"), "{tex}");
    assert!(!tex.contains("mark=star"), "{tex}");
}

#[test]
fn tex_query_no_legend_removes_the_legend_line() {
    let temp = tempdir().unwrap();
    write_experiment(temp.path(), "exp-a", EXP_A);

    benchrep()
        .current_dir(temp.path())
        .args(["tex", "query", "exp-a", "--no-legend"])
        .assert()
        .success();

    let tex = fs::read_to_string(temp.path().join("plot_queries_data.tex")).unwrap();
    assert!(!tex.contains("\\legend{"), "{tex}");
}

#[test]
fn tex_query_rejects_differing_query_sets() {
    let temp = tempdir().unwrap();
    write_experiment(temp.path(), "exp-a", EXP_A);
    write_experiment(
        temp.path(),
        "exp-c",
        "name;id;results;time;error;httpRequests;timestamps\nq1;0;5;100;false;3;20 60 100\n",
    );

    benchrep()
        .current_dir(temp.path())
        .args(["tex", "query", "exp-a", "exp-c"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("different query sets"));
}

#[test]
fn tex_query_fails_when_nothing_matches() {
    let temp = tempdir().unwrap();
    write_experiment(temp.path(), "exp-a", EXP_A);

    benchrep()
        .current_dir(temp.path())
        .args(["tex", "query", "exp-a", "-q", "^nothing$"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no queries could be found"));
}

#[test]
fn tex_query_times_pivots_arrival_timestamps() {
    let temp = tempdir().unwrap();
    write_experiment(temp.path(), "exp-a", EXP_A);
    write_experiment(temp.path(), "exp-b", EXP_B);

    benchrep()
        .current_dir(temp.path())
        .args(["tex", "query-times", "q1", "exp-a", "exp-b"])
        .assert()
        .success();

    let data = fs::read_to_string(temp.path().join("query_times.csv")).unwrap();
    assert_eq!(data, "exp-a;exp-b\n20;100\n60;200\n100;300\n");

    let tex = fs::read_to_string(temp.path().join("query_times.tex")).unwrap();
    assert!(
        tex.contains(
            "\\addplot+[mark=none] table [y expr=\\coordindex+1, x=exp-a, col sep=semicolon]{\"query_times.csv\"};"
        ),
        "{tex}"
    );
    assert!(tex.contains("\\legend{exp-a,exp-b}"), "{tex}");
}

#[test]
fn tex_query_times_log_axis_replaces_the_ymin_line() {
    let temp = tempdir().unwrap();
    write_experiment(temp.path(), "exp-a", EXP_A);

    benchrep()
        .current_dir(temp.path())
        .args(["tex", "query-times", "q1", "exp-a", "--log-y"])
        .assert()
        .success();

    let tex = fs::read_to_string(temp.path().join("query_times.tex")).unwrap();
    assert!(tex.contains("ymode=log,log origin=infty,"), "{tex}");
    assert!(!tex.contains("ymin=0,\n"), "{tex}");
}

#[test]
fn templates_root_overrides_the_embedded_template() {
    let temp = tempdir().unwrap();
    write_experiment(temp.path(), "exp-a", EXP_A);
    let templates = temp.path().join("templates");
    fs::create_dir_all(&templates).unwrap();
    fs::write(
        templates.join("plot_query_data.tex"),
        "custom %QUERIES% / %LEGEND%\n",
    )
    .unwrap();

    benchrep()
        .current_dir(temp.path())
        .args(["tex", "query", "exp-a", "--templates-root", "templates"])
        .assert()
        .success();

    let tex = fs::read_to_string(temp.path().join("plot_queries_data.tex")).unwrap();
    assert_eq!(tex, "custom q1,q2 / exp-a\n");
}
