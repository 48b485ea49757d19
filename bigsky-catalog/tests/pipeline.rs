//! End-to-end builds over a small fixture data tree.

use bigsky_catalog::store::{STARS_DB, STARS_MAG11_DB};
use bigsky_catalog::{run_csv, run_database, BuildConfig, CatalogError};
use rusqlite::Connection;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const MAIN_ROW: &str = "0001 00008 1| |  2.31750494|  2.23184345|  -16.3|   -9.0| 68| 73| 1.7| 1.8|1958.89|1951.94| 4|1.0|1.0|0.9|1.0|12.146|0.158|12.146|0.223|999| |         |  2.31754222|  2.23186444|1.67|1.54| 88.0|100.8| |-0.2";
const BRIGHT_ROW: &str = "0001 00013 1| |  1.12558209|  2.26739400|   27.7|   -0.5| 9| 12| 1.2| 1.2|1990.76|1989.25| 8|1.0|1.0|1.0|1.0|10.488|0.038| 8.670|0.015|999| |         |  1.12551889|  2.26739556|1.81|1.52|  9.3| 12.7| |-0.2";
const FAINT_ROW: &str = "0001 00016 1| |  1.05686490|  1.89782870|  -25.9|  -44.4| 85| 99| 2.1| 2.4|1959.29|1963.26| 2|1.0|1.0|1.0|1.0|12.921|0.335|12.100|0.243|999| |         |  1.05692417|  1.89793306|1.52|1.46| 88.1|103.1| |-0.4";

const MAIN_NO_POSITION: &str = "0001 00017 1|X|            |            |       |       |   |   |    |    |       |       |  |   |   |   |   |12.500|0.300|12.100|0.250|999| |         |            |            |x.xx|    |     |     | |-0.2";

const SUPPLEMENT_HIP_ROW: &str = "0022 00341 2|H| 17.30306378|  2.55263389|   -7.8|  -28.5| 13.3| 10.1|  1.5|  1.2|H|      |     |11.851|0.084|  3|T|  5413B";
const SUPPLEMENT_ROW: &str = "0001 00016 2|T|  1.07310286|  1.89626392|   -8.1|  -11.3| 48.2| 34.8|  6.3|  4.6| |11.952|0.116|11.475|0.108|  5| |      ";
const SUPPLEMENT_NO_POSITION: &str = "0014 00001 2|T|            |            |       |       | 60.0| 60.0|     |     | |12.500|0.300|12.100|0.250|999| |      ";

const HIP_LINE: &str = "H|        5413| |01 09 12.71|+02 33 09.5| 9.27| |G|017.30296036|+02.55265086| |   1.77|   -6.86|  -28.91|  1.54|  1.00|  1.27|  1.52|  1.06";
const TYC_LINE: &str = "T|   1   13 1| |00 04 30.13|+02 16 02.6| 8.55| |H|001.12554357|+02.26739400| |   7.00|   27.71|   -0.49|  1.20|  1.10|  1.40|  1.30|  1.20";

const NGC_CSV: &str = "\
Name;Type;RA;Dec;Const;MajAx;MinAx;PosAng;B-Mag;V-Mag;M;NGC;IC;Common names
NGC0224;G;00:42:44.35;+41:16:08.6;And;177.83;69.66;35;4.29;3.44;031;;;Andromeda Galaxy
IC0002;G;00:11:00.88;-12:49:22.3;Cet;0.98;0.32;142;15.46;;;;;
NGC0001;G;;;;;;;;;;;;
";

fn write(path: &Path, lines: &[&str]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut text = lines.join("\n");
    text.push('\n');
    fs::write(path, text).unwrap();
}

fn wds_line(id: &str, discoverer: &str, coords: &str) -> String {
    format!("{:<10}{:<7}{:<95}{}", id, discoverer, "", coords)
}

/// Raw data tree with four main rows split over two chunks (one without a
/// position), three supplement rows and a Hipparcos reference for HIP 5413.
fn fixture(tyc_main: &[&str]) -> TempDir {
    let root = TempDir::new().unwrap();
    let data = root.path().join("raw");
    write(&data.join("tycho-2/tyc2.dat.00"), &[MAIN_ROW, BRIGHT_ROW]);
    write(&data.join("tycho-2/tyc2.dat.01"), &[FAINT_ROW, MAIN_NO_POSITION]);
    write(
        &data.join("tycho-2/suppl_1.dat"),
        &[SUPPLEMENT_HIP_ROW, SUPPLEMENT_ROW, SUPPLEMENT_NO_POSITION],
    );
    write(&data.join("tycho-1/hip_main.dat"), &[HIP_LINE]);
    write(&data.join("tycho-1/tyc_main.dat"), tyc_main);
    root
}

fn config(root: &TempDir) -> BuildConfig {
    BuildConfig::new(root.path().join("raw"), root.path().join("build"))
}

fn read_rows(path: &Path) -> Vec<Vec<String>> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|l| l.split(',').map(str::to_string).collect())
        .collect()
}

fn row<'a>(rows: &'a [Vec<String>], tyc: &str) -> &'a [String] {
    rows.iter()
        .find(|r| r[0] == tyc)
        .unwrap_or_else(|| panic!("{} not in output", tyc))
}

fn num(cell: &str) -> f64 {
    cell.parse().unwrap()
}

#[test]
fn test_csv_build_end_to_end() {
    let root = fixture(&[]);
    let summary = run_csv(&config(&root)).unwrap();

    assert_eq!(summary.primary.read, 4);
    assert_eq!(summary.primary.emitted, 3);
    // blank RA/Dec is a drop even though its epoch fields are malformed
    assert_eq!(summary.primary.no_position, 1);
    assert_eq!(summary.primary.errors, 0);
    assert_eq!(summary.supplement.read, 3);
    assert_eq!(summary.supplement.emitted, 2);
    assert_eq!(summary.supplement.no_position, 1);
    assert_eq!(summary.total().emitted, 5);
    assert_eq!(summary.total().secondary, 2);

    let build = root.path().join("build");
    let stars = read_rows(&build.join("bigsky.stars.csv"));
    assert_eq!(stars.len(), 6);
    assert_eq!(stars[0].len(), 10);
    assert_eq!(stars[0][0], "tyc_id");

    // input order: main chunks in name order, then the supplement
    let order: Vec<&str> = stars[1..].iter().map(|r| r[0].as_str()).collect();
    assert_eq!(order, vec!["1-8-1", "1-13-1", "1-16-1", "22-341-2", "1-16-2"]);

    assert_eq!(
        row(&stars, "1-8-1").join(","),
        "1-8-1,,,12.15,0,2.3175,2.2319,-16.3,-9,0"
    );

    let faint = row(&stars, "1-16-1");
    assert_eq!(faint[3], "12.03");
    assert_eq!(faint[4], "0.7");
    assert!((num(&faint[5]) - 1.0568).abs() < 2e-4);
    assert!((num(&faint[6]) - 1.8978).abs() < 2e-4);

    let hip = row(&stars, "22-341-2");
    assert_eq!(&hip[1..5], &["5413", "B", "9.27", ""]);
    assert_eq!(&hip[7..10], &["-6.86", "-28.91", "1.77"]);
    assert!((num(&hip[5]) - 17.3031).abs() < 2e-4);
    assert!((num(&hip[6]) - 2.5525).abs() < 2e-4);

    let supplement = row(&stars, "1-16-2");
    assert_eq!(supplement[3], "11.43");
    assert_eq!(supplement[4], "0.41");
    assert!((num(&supplement[5]) - 1.0731).abs() < 2e-4);
    assert!((num(&supplement[6]) - 1.8963).abs() < 2e-4);

    let bright = read_rows(&build.join("bigsky.stars.mag11.csv"));
    let bright_ids: Vec<&str> = bright[1..].iter().map(|r| r[0].as_str()).collect();
    assert_eq!(bright_ids, vec!["1-13-1", "22-341-2"]);
    assert_eq!(row(&bright, "1-13-1")[3], "8.51");
    assert_eq!(row(&bright, "1-13-1")[9], "0");
}

#[test]
fn test_tycho1_reference_overrides_parallax() {
    let root = fixture(&[TYC_LINE]);
    run_csv(&config(&root)).unwrap();

    let stars = read_rows(&root.path().join("build/bigsky.stars.csv"));
    let star = row(&stars, "1-13-1");
    assert_eq!(star[3], "8.55");
    assert_eq!(&star[7..10], &["27.71", "-0.49", "7"]);
    assert!((num(&star[5]) - 1.1256).abs() < 2e-4);
    assert!((num(&star[6]) - 2.2674).abs() < 2e-4);

    // rows without a matching reference are untouched
    assert_eq!(row(&stars, "1-8-1")[9], "0");
}

#[test]
fn test_rebuild_is_byte_identical() {
    let root = fixture(&[TYC_LINE]);
    let config = config(&root);
    let paths = [
        root.path().join("build/bigsky.stars.csv"),
        root.path().join("build/bigsky.stars.mag11.csv"),
    ];

    run_csv(&config).unwrap();
    let first: Vec<Vec<u8>> = paths.iter().map(|p| fs::read(p).unwrap()).collect();
    run_csv(&config).unwrap();
    let second: Vec<Vec<u8>> = paths.iter().map(|p| fs::read(p).unwrap()).collect();
    assert_eq!(first, second);
}

#[test]
fn test_primary_error_limit() {
    let root = fixture(&[]);
    let bad: Vec<String> = (0..11).map(|i| format!("garbage {}|x", i)).collect();
    let mut lines: Vec<&str> = bad.iter().map(String::as_str).collect();
    lines.push(MAIN_ROW);
    write(&root.path().join("raw/tycho-2/tyc2.dat.02"), &lines);

    let err = run_csv(&config(&root)).unwrap_err();
    match err {
        CatalogError::FatalIngest { pass, errors, limit } => {
            assert_eq!(pass, "tycho2-main");
            assert_eq!(errors, 11);
            assert_eq!(limit, 10);
        }
        other => panic!("expected FatalIngest, got {}", other),
    }

    // at the limit the run completes and counts the errors
    let summary = run_csv(&config(&root).with_error_limit(11)).unwrap();
    assert_eq!(summary.primary.errors, 11);
    assert_eq!(summary.primary.emitted, 4);
}

#[test]
fn test_supplement_errors_never_abort() {
    let root = fixture(&[]);
    let bad: Vec<String> = (0..20).map(|i| format!("broken {}", i)).collect();
    let mut lines: Vec<&str> = bad.iter().map(String::as_str).collect();
    lines.push(SUPPLEMENT_ROW);
    write(&root.path().join("raw/tycho-2/suppl_1.dat"), &lines);

    let summary = run_csv(&config(&root)).unwrap();
    assert_eq!(summary.supplement.errors, 20);
    assert_eq!(summary.supplement.emitted, 1);
}

#[test]
fn test_extended_columns() {
    let root = fixture(&[]);
    let data = root.path().join("raw");
    write(&data.join("names/common_names.csv"), &["hip,name", "5413,Test Star"]);
    write(
        &data.join("constellations/boundaries.dat"),
        &[" 1.0000  3.0000 -10.0000 CET", " 0.0000 24.0000 -90.0000 PSC"],
    );

    run_csv(&config(&root).with_extended(true)).unwrap();
    let stars = read_rows(&root.path().join("build/bigsky.stars.csv"));
    assert_eq!(stars[0].len(), 15);
    assert_eq!(stars[0][14], "constellation");

    let hip = row(&stars, "22-341-2");
    assert_eq!(hip[10], "Test Star");
    assert_eq!(hip[11], "");
    assert_eq!(hip[14], "cet");

    // no HIP: names stay blank, constellation still derived
    let plain = row(&stars, "1-8-1");
    assert_eq!(plain[10], "");
    assert_eq!(plain[14], "psc");
}

#[test]
fn test_database_build() {
    let root = fixture(&[]);
    let data = root.path().join("raw");
    write(&data.join("ongc/NGC.csv"), &[NGC_CSV.trim_end()]);
    let doubles = [
        wds_line("00000+7530", "A 1248", "000006.64+752859.8"),
        wds_line("00000+7530", "A 1248", "000006.64+752859.8"),
        wds_line("00001-0122", "STF  60", "000005.30-012159.0"),
    ];
    let double_lines: Vec<&str> = doubles.iter().map(String::as_str).collect();
    write(&data.join("wds/wds_all.txt"), &double_lines);

    let summary = run_database(&config(&root).with_batch_size(2)).unwrap();
    assert_eq!(summary.total().emitted, 5);
    let dso = summary.deep_sky.unwrap();
    assert_eq!(dso.loaded, 2);
    assert_eq!(dso.no_position, 1);
    let wds = summary.double_stars.unwrap();
    assert_eq!(wds.loaded, 2);
    assert_eq!(wds.duplicates, 1);

    let count = |conn: &Connection, table: &str| -> i64 {
        conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| r.get(0))
            .unwrap()
    };

    let full = Connection::open(root.path().join("build").join(STARS_DB)).unwrap();
    assert_eq!(count(&full, "star"), 5);
    assert_eq!(count(&full, "deep_sky_object"), 2);
    assert_eq!(count(&full, "double_star"), 2);

    let (magnitude, parallax): (f64, f64) = full
        .query_row(
            "SELECT magnitude, parallax FROM star WHERE hip_id = 5413",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .unwrap();
    assert_eq!(magnitude, 9.27);
    assert_eq!(parallax, 1.77);

    let bright = Connection::open(root.path().join("build").join(STARS_MAG11_DB)).unwrap();
    assert_eq!(count(&bright, "star"), 2);
    assert_eq!(count(&bright, "deep_sky_object"), 2);
    assert_eq!(count(&bright, "double_star"), 2);
    drop((full, bright));

    // a rebuild starts from empty tables
    run_database(&config(&root)).unwrap();
    let full = Connection::open(root.path().join("build").join(STARS_DB)).unwrap();
    assert_eq!(count(&full, "star"), 5);
}
