use std::fs;
use std::io::Write;
use std::path::PathBuf;

use fanduel_lp::formulation::Formulate;
use fanduel_lp::generate::RosterGenerator;
use fanduel_lp::{load_players, Error, Position};
use tempfile::{NamedTempFile, TempDir};

const HEADER: &str = "PLAYER,TEAM,POSITION,SALARY,PROJECTION";

const LINEUP: &[&str] = &[
    "Tom Brady,NE,QB,5000,20.0",
    "Adrian Peterson,MIN,RB,9000,18.5",
    "Le'Veon Bell,PIT,RB,8800,17.25",
    "Julio Jones,ATL,WR,9200,16.0",
    "A.J. Green,CIN,WR,8000,14.5",
    "Odell Beckham Jr.,NYG,WR,8700,15.75",
    "Rob Gronkowski,NE,TE,8400,13.0",
    "Stephen Gostkowski,NE,K,5200,9.0",
    "Seattle,SEA,D,5000,8.5",
];

fn player_file(rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{HEADER}").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    file.flush().unwrap();
    file
}

fn command(input: &NamedTempFile, output: PathBuf) -> Formulate {
    Formulate {
        player_data_file: input.path().to_path_buf(),
        salary_cap: 60000,
        min_player_proj: 2.718,
        proj_jitter: 0.0,
        seed: Some(0),
        output: Some(output),
    }
}

#[test]
fn nine_player_lineup_produces_full_model() {
    let input = player_file(LINEUP);
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("lineup.lp");

    command(&input, output.clone()).formulate().unwrap();

    let lp = fs::read_to_string(&output).unwrap();
    let lines = lp.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 9);
    assert_eq!(lines[0], "max: 20 QB_TomBrady + 18.5 RB_AdrianPeterson + 17.25 RB_LeVeonBell + 16 WR_JulioJones + 14.5 WR_AJGreen + 15.75 WR_OdellBeckhamJr + 13 TE_RobGronkowski + 9 K_StephenGostkowski + 8.5 D_Seattle;");
    assert_eq!(&lines[1..7], &[
        "qb_lim: QB_TomBrady = 1;",
        "rb_lim: RB_AdrianPeterson + RB_LeVeonBell = 2;",
        "wr_lim: WR_JulioJones + WR_AJGreen + WR_OdellBeckhamJr = 3;",
        "te_lim: TE_RobGronkowski = 1;",
        "k_lim: K_StephenGostkowski = 1;",
        "d_lim: D_Seattle = 1;",
    ]);
    assert!(lines[7].starts_with("sal_lim: 5000 QB_TomBrady + 9000 RB_AdrianPeterson"));
    assert!(lines[7].ends_with(" <= 60000;"));
    assert_eq!(lines[8].trim_end_matches(';').split_whitespace().skip(1).count(), 9);
}

#[test]
fn low_projections_are_filtered_before_formulating() {
    let mut rows = LINEUP.to_vec();
    rows.push("Backup Passer,NE,QB,4500,1.2");
    rows.push("Practice Squad,NE,WR,4500,2.7");
    let input = player_file(&rows);
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("lineup.lp");

    command(&input, output.clone()).formulate().unwrap();

    let lp = fs::read_to_string(&output).unwrap();
    assert!(!lp.contains("QB_BackupPasser"));
    assert!(!lp.contains("WR_PracticeSquad"));
    assert!(lp.lines().last().unwrap().starts_with("bin QB_TomBrady "));
}

#[test]
fn position_emptied_by_filter_fails_without_output() {
    let mut rows = LINEUP.to_vec();
    rows[6] = "Rob Gronkowski,NE,TE,8400,1.0";
    let input = player_file(&rows);
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("lineup.lp");

    let err = command(&input, output.clone()).formulate().unwrap_err();

    assert!(matches!(err, Error::InfeasibleRoster { position: Position::TE, available: 0, .. }));
    assert!(err.to_string().contains("TE"));
    assert!(!output.exists());
}

#[test]
fn colliding_variable_names_fail_without_output() {
    let mut rows = LINEUP.to_vec();
    rows.push("AJ Green,CIN,WR,7900,14.0");
    let input = player_file(&rows);
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("lineup.lp");

    let err = command(&input, output.clone()).formulate().unwrap_err();

    assert!(matches!(err, Error::VariableNameCollision { ref variable, .. } if variable == "WR_AJGreen"));
    assert!(!output.exists());
}

#[test]
fn unknown_position_fails_without_output() {
    let mut rows = LINEUP.to_vec();
    rows.push("Some Punter,NE,P,4500,3.0");
    let input = player_file(&rows);
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("lineup.lp");

    let err = command(&input, output.clone()).formulate().unwrap_err();

    assert!(matches!(err, Error::UnknownPosition { line: Some(11), ref code } if code == "P"));
    assert!(!output.exists());
}

#[test]
fn invalid_jitter_is_rejected_before_reading_input() {
    let dir = TempDir::new().unwrap();
    let input = player_file(LINEUP);
    let mut cmd = command(&input, dir.path().join("lineup.lp"));
    cmd.proj_jitter = 1.0;
    cmd.player_data_file = dir.path().join("missing.csv");

    assert!(matches!(cmd.formulate(), Err(Error::InvalidConfig(_))));
}

#[test]
fn seeded_jitter_is_reproducible() {
    let input = player_file(LINEUP);
    let dir = TempDir::new().unwrap();

    let run = |name: &str, seed: u128| {
        let mut cmd = command(&input, dir.path().join(name));
        cmd.proj_jitter = 0.2;
        cmd.seed = Some(seed);
        cmd.formulate().unwrap();
        fs::read_to_string(dir.path().join(name)).unwrap()
    };

    let a = run("a.lp", 17);
    let b = run("b.lp", 17);
    let c = run("c.lp", 18);
    assert_eq!(a, b);
    assert_ne!(a.lines().next(), c.lines().next());
    // only the objective moves
    assert_eq!(a.lines().skip(1).collect::<Vec<_>>(), c.lines().skip(1).collect::<Vec<_>>());
}

#[test]
fn generated_players_formulate_cleanly() {
    let dir = TempDir::new().unwrap();
    let players = dir.path().join("players.csv");
    RosterGenerator {
        seed: Some(2015),
        qb: 4, rb: 6, wr: 8, te: 3, k: 2, d: 3,
        min_salary: 4500,
        max_salary: 9500,
        output: Some(players.clone()),
    }.generate().unwrap();

    let roster = load_players(&players).unwrap();
    assert_eq!(roster.len(), 26);

    let output = dir.path().join("lineup.lp");
    let cmd = Formulate {
        player_data_file: players,
        salary_cap: 60000,
        min_player_proj: f64::MIN,
        proj_jitter: 0.0,
        seed: None,
        output: Some(output.clone()),
    };
    cmd.formulate().unwrap();

    let lp = fs::read_to_string(&output).unwrap();
    let binaries = lp.lines().last().unwrap().trim_end_matches(';').split_whitespace().skip(1).count();
    assert_eq!(binaries, 26);
}
