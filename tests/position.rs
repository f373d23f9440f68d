use crate::command::assert_cmd_snapshot;

use crate::recur;

#[test]
fn leap_day() {
    assert_cmd_snapshot!(
        recur(["position", "2024-02-29"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-02-29 daysOfWeek=4 daysOfMonth=29/-1 weeksOfMonth=5/-1 weeksOfMonthByDay=5/-1 weeksOfYear=9/-44 monthsOfYear=1

    ----- stderr -----
    ",
    );
}

#[test]
fn week_start() {
    assert_cmd_snapshot!(
        recur(["position", "--week-start", "sun", "2024-03-03"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-03-03 daysOfWeek=0 daysOfMonth=3/-29 weeksOfMonth=2/-5 weeksOfMonthByDay=1/-5 weeksOfYear=10/-43 monthsOfYear=2

    ----- stderr -----
    ",
    );
}

/// The positions of the dates that a calendar rule lets through.
#[test]
fn after_match() {
    let stdin = "\
2024-01-05
2024-01-06
2024-01-07
2024-01-08
";
    assert_cmd_snapshot!(
        recur(["match", "daysOfWeek", "sat,sun"])
            .stdin(stdin)
            .pipe(recur(["position"])),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-01-06 daysOfWeek=6 daysOfMonth=6/-26 weeksOfMonth=1/-5 weeksOfMonthByDay=1/-4 weeksOfYear=1/-52 monthsOfYear=0
    2024-01-07 daysOfWeek=0 daysOfMonth=7/-25 weeksOfMonth=1/-5 weeksOfMonthByDay=1/-4 weeksOfYear=1/-52 monthsOfYear=0

    ----- stderr -----
    ",
    );
}

#[test]
fn invalid_date_on_stdin() {
    let stdin = "\
2024-01-05

2024-13-01
";
    let snap = recur(["position"]).stdin(stdin).snapshot();
    let out = &snap.text;
    assert!(out.starts_with("success: false\nexit_code: 1\n"), "{out}");
    assert!(out.contains("2024-01-05 daysOfWeek=5"), "{out}");
    assert!(
        out.contains("line 3 of <stdin>: invalid date `2024-13-01`: "),
        "{out}",
    );
}
