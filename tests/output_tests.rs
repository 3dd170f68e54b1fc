use pretty_assertions::assert_eq;
use std::fs;
use std::io::Cursor;
use trace_contention::aggregator::CountingMode;
use trace_contention::commands::analyze_reader;
use trace_contention::output::{render_report, validate_dir, write_hotspots};

const TWO_THREAD_TRACE: &str = " > sig W 0x10 4 t1 src1\n > sig R 0x10 4 t2 src2\n";

#[test]
fn test_render_end_to_end_report() {
    let analysis =
        analyze_reader(Cursor::new(TWO_THREAD_TRACE), CountingMode::Compatible, false).unwrap();
    let report = render_report("trace.log", &analysis.metrics());

    let expected = "\
Analyzing trace.log

Operations:                R W
Threads:                   2

Unique addresses:          1
Accesses:                  2

Unique addresses (byte):   4
Accesses (byte):           8

Addresses with multi-threaded access:          1          (100.00% of total)
Multi-threaded accesses:                       2          (100.00% of total)

Addresses with multi-threaded access (byte):   4          (100.00% of total)
Multi-threaded accesses (byte):                8          (100.00% of total)
";

    assert_eq!(report, expected);
}

#[test]
fn test_render_single_count_report() {
    let analysis =
        analyze_reader(Cursor::new(TWO_THREAD_TRACE), CountingMode::SingleCount, false).unwrap();
    let report = render_report("trace.log", &analysis.metrics());

    assert!(report.contains(
        "Multi-threaded accesses:                       1          (50.00% of total)\n"
    ));
    assert!(report.contains(
        "Multi-threaded accesses (byte):                4          (50.00% of total)\n"
    ));
}

#[test]
fn test_render_empty_trace_reports_not_applicable() {
    let analysis =
        analyze_reader(Cursor::new("no records here\n"), CountingMode::Compatible, false).unwrap();
    let report = render_report("empty.log", &analysis.metrics());

    assert!(report.contains("Operations:                \n"));
    assert!(report.contains("Threads:                   0\n"));
    assert_eq!(report.matches("(N/A of total)").count(), 4);
}

#[test]
fn test_write_hotspots() {
    let trace = concat!(
        " > sig read4 0x20 4 1 a.c:1\n",
        " > sig read4 0x20 4 2 a.c:1\n",
        " > sig write4 0x10 4 1 b.c:2\n",
        " > sig read4 0x10 4 1 b.c:2\n",
    );
    let analysis = analyze_reader(Cursor::new(trace), CountingMode::Compatible, true).unwrap();
    assert_eq!(analysis.lines.records, 4);
    let tally = analysis.hotspots.as_ref().unwrap();

    let temp_dir = tempfile::tempdir().unwrap();
    let out_dir = temp_dir.path().join("nested/hotspots");
    let written = write_hotspots(&out_dir, tally, None).unwrap();

    assert_eq!(written.len(), 4);

    let address_reads = fs::read_to_string(out_dir.join("address-read-sort.txt")).unwrap();
    assert_eq!(address_reads, "0x20 2 0 2\n0x10 1 1 1\n");

    let address_writes = fs::read_to_string(out_dir.join("address-write-sort.txt")).unwrap();
    assert_eq!(address_writes, "0x10 1 1 1\n0x20 2 0 2\n");

    let source_writes = fs::read_to_string(out_dir.join("source-write-sort.txt")).unwrap();
    assert_eq!(source_writes, "b.c:2 1 1 1\na.c:1 2 0 2\n");
}

#[test]
fn test_write_hotspots_top_limit() {
    let trace = " > sig W 0x10 1 1 a\n > sig W 0x20 1 1 b\n > sig W 0x20 1 1 b\n";
    let analysis = analyze_reader(Cursor::new(trace), CountingMode::Compatible, true).unwrap();

    let temp_dir = tempfile::tempdir().unwrap();
    write_hotspots(temp_dir.path(), analysis.hotspots.as_ref().unwrap(), Some(1)).unwrap();

    let listing = fs::read_to_string(temp_dir.path().join("source-write-sort.txt")).unwrap();
    assert_eq!(listing, "b 0 2 1\n");
}

#[test]
fn test_validate_dir_rejects_file() {
    let temp_file = tempfile::NamedTempFile::new().unwrap();
    assert!(validate_dir(temp_file.path()).is_err());
    assert!(validate_dir(std::path::Path::new("")).is_err());
}
