use crate::command::assert_cmd_snapshot;

use crate::recur;

#[test]
fn list() {
    assert_cmd_snapshot!(
        recur(["measures"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    day	days	interval
    week	weeks	interval
    month	months	interval
    year	years	interval
    dayOfWeek	daysOfWeek	calendar
    dayOfMonth	daysOfMonth	calendar
    weekOfMonth	weeksOfMonth	calendar
    weekOfMonthByDay	weeksOfMonthByDay	calendar
    weekOfYear	weeksOfYear	calendar
    monthOfYear	monthsOfYear	calendar

    ----- stderr -----
    ",
    );
}

#[test]
fn no_arguments_allowed() {
    let snap = recur(["measures", "days"]).snapshot();
    let out = &snap.text;
    assert!(out.starts_with("success: false\nexit_code: 1\n"), "{out}");
    assert!(out.contains("days"), "{out}");
}
