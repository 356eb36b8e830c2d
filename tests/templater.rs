use tracecalc::{
    error::SweepError,
    template::{
        command::{CommandTemplate, Segment},
        plan::{Action, Step, SweepPlan},
        sweep::{Sweep, SweepPoint, Traversal, parse_series},
    },
};

fn permutation(priority: &[&str]) -> Traversal {
    Traversal::Permutation { priority: priority.iter().map(ToString::to_string).collect() }
}

fn pairs(points: &[SweepPoint]) -> Vec<Vec<(String, f64)>> {
    points.iter()
          .map(|p| p.iter().map(|(n, v)| (n.to_string(), v)).collect())
          .collect()
}

#[test]
fn template_splits_at_every_variable() {
    let template = CommandTemplate::parse("APPL:SIN freq, amp, off", &["freq", "amp", "off"]).unwrap();

    assert_eq!(template.segments(),
               &[Segment::Text("APPL:SIN ".to_string()),
                 Segment::Slot("freq".to_string()),
                 Segment::Text(", ".to_string()),
                 Segment::Slot("amp".to_string()),
                 Segment::Text(", ".to_string()),
                 Segment::Slot("off".to_string())]);
    assert_eq!(template.slot_count(), 3);
    assert_eq!(template.format_string(), "APPL:SIN {freq}, {amp}, {off}");
}

#[test]
fn format_string_escapes_literal_braces() {
    let template = CommandTemplate::parse("DATA {a}, a", &["a"]).unwrap();

    assert_eq!(template.format_string(), "DATA {{{a}}}, {a}");
}

#[test]
fn longest_name_wins_at_one_position() {
    let template = CommandTemplate::parse("VOLT vmax vm", &["vm", "vmax"]).unwrap();

    assert_eq!(template.variables(), vec!["vmax", "vm"]);
    assert_eq!(template.format_string(), "VOLT {vmax} {vm}");
}

#[test]
fn names_match_inside_words() {
    let template = CommandTemplate::parse("VOLT V", &["V"]).unwrap();

    assert_eq!(template.slot_count(), 2);
    assert_eq!(template.variables(), vec!["V"]);
    assert_eq!(template.format_string(), "{V}OLT {V}");
}

#[test]
fn command_without_variables_is_literal() {
    let template = CommandTemplate::parse("*RST", &["x"]).unwrap();

    assert_eq!(template.slot_count(), 0);
    assert_eq!(template.render(&SweepPoint::default()).unwrap(), "*RST");

    let empty = CommandTemplate::parse::<&str>("", &[]).unwrap();
    assert!(empty.segments().is_empty());
}

#[test]
fn render_requires_every_slot() {
    let template = CommandTemplate::parse("CURR i; VOLT v", &["i", "v"]).unwrap();
    let point = SweepPoint::from_iter([("v", 1.5)]);

    assert_eq!(template.render(&point).unwrap_err(),
               SweepError::MissingValue { name: "i".to_string() });
}

#[test]
fn sequential_sweep_truncates_to_shortest_series() {
    let sweep = Sweep::new([("a", vec![1.0, 2.0, 3.0, 4.0]), ("b", vec![10.0, 20.0])]);

    assert_eq!(sweep.len(&Traversal::Sequential).unwrap(), 2);
    assert_eq!(pairs(&sweep.points(&Traversal::Sequential).unwrap()),
               vec![vec![("a".to_string(), 1.0), ("b".to_string(), 10.0)],
                    vec![("a".to_string(), 2.0), ("b".to_string(), 20.0)]]);
}

#[test]
fn permutation_sweep_visits_every_combination() {
    let sweep = Sweep::new([("a", vec![1.0, 2.0]), ("b", vec![10.0, 20.0, 30.0])]);
    let all = permutation(&[]);

    assert_eq!(sweep.len(&all).unwrap(), 6);
    let points = sweep.points(&all).unwrap();
    let values: Vec<(f64, f64)> = points.iter()
                                        .map(|p| (p.get("a").unwrap(), p.get("b").unwrap()))
                                        .collect();
    assert_eq!(values,
               vec![(1.0, 10.0), (1.0, 20.0), (1.0, 30.0), (2.0, 10.0), (2.0, 20.0), (2.0, 30.0)]);
}

#[test]
fn priority_sets_loop_order_but_not_point_order() {
    let sweep = Sweep::new([("a", vec![1.0, 2.0]), ("b", vec![10.0, 20.0])]);
    let points = sweep.points(&permutation(&["b", "a"])).unwrap();

    assert_eq!(pairs(&points)[1],
               vec![("a".to_string(), 2.0), ("b".to_string(), 10.0)]);
    let values: Vec<(f64, f64)> = points.iter()
                                        .map(|p| (p.get("a").unwrap(), p.get("b").unwrap()))
                                        .collect();
    assert_eq!(values, vec![(1.0, 10.0), (2.0, 10.0), (1.0, 20.0), (2.0, 20.0)]);
}

#[test]
fn unlisted_variables_follow_in_declaration_order() {
    let sweep = Sweep::new([("a", vec![1.0, 2.0]), ("b", vec![3.0, 4.0]), ("c", vec![5.0, 6.0])]);
    let points = sweep.points(&permutation(&["c"])).unwrap();

    let order: Vec<(f64, f64, f64)> = points.iter()
                                            .take(3)
                                            .map(|p| {
                                                (p.get("c").unwrap(),
                                                 p.get("a").unwrap(),
                                                 p.get("b").unwrap())
                                            })
                                            .collect();
    assert_eq!(order, vec![(5.0, 1.0, 3.0), (5.0, 1.0, 4.0), (5.0, 2.0, 3.0)]);
}

#[test]
fn sweep_lengths_match_min_and_product() {
    let sweep = Sweep::new([("a", vec![1.0; 3]), ("b", vec![2.0; 5]), ("c", vec![3.0; 4])]);

    assert_eq!(sweep.len(&Traversal::Sequential).unwrap(), 3);
    assert_eq!(sweep.points(&Traversal::Sequential).unwrap().len(), 3);
    assert_eq!(sweep.len(&permutation(&[])).unwrap(), 60);
    assert_eq!(sweep.points(&permutation(&["b"])).unwrap().len(), 60);
}

#[test]
fn empty_sweeps() {
    let none = Sweep::default();
    assert_eq!(none.len(&Traversal::Sequential).unwrap(), 0);
    assert_eq!(none.points(&permutation(&[])).unwrap(), vec![SweepPoint::default()]);

    let hollow = Sweep::new([("a", vec![1.0, 2.0]), ("b", vec![])]);
    assert!(hollow.points(&permutation(&[])).unwrap().is_empty());
}

#[test]
fn invalid_priorities_are_rejected() {
    let sweep = Sweep::new([("a", vec![1.0]), ("b", vec![2.0])]);

    assert_eq!(sweep.points(&permutation(&["z"])).unwrap_err(),
               SweepError::UnknownVariable { name: "z".to_string() });
    assert_eq!(sweep.len(&permutation(&["a", "b", "a"])).unwrap_err(),
               SweepError::DuplicatePriority { name: "a".to_string() });
}

#[test]
fn redeclared_variable_replaces_its_series() {
    let mut sweep = Sweep::new([("a", vec![1.0]), ("b", vec![2.0])]);
    sweep.push("a", vec![7.0, 8.0]);

    assert_eq!(sweep.names().collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(sweep.variables()[0].values, vec![7.0, 8.0]);
}

#[test]
fn series_parsing() {
    assert_eq!(parse_series("1, 2, 3").unwrap(), vec![1.0, 2.0, 3.0]);
    assert_eq!(parse_series(" -1.5,2e-3 ,, 4 ").unwrap(), vec![-1.5, 0.002, 4.0]);
    assert!(parse_series("").unwrap().is_empty());
    assert_eq!(parse_series("1, x").unwrap_err(),
               SweepError::InvalidSeriesValue { token: "x".to_string() });
}

#[test]
fn steps_parse_from_text() {
    assert_eq!("psu|OUTP ON".parse::<Step>().unwrap(), Step::write("psu", "OUTP ON"));
    assert_eq!("dmm | READ? | v".parse::<Step>().unwrap(),
               Step::query("dmm", "READ?", "v"));
    assert_eq!("dmm|READ?|".parse::<Step>().unwrap(), Step::write("dmm", "READ?"));
    assert_eq!("| wait".parse::<Step>().unwrap(), Step::comment("wait"));

    for bad in ["psu|", "psu||v", "|READ?|v", "a|b|c|d"] {
        assert_eq!(bad.parse::<Step>().unwrap_err(),
                   SweepError::InvalidStep { step: bad.to_string() });
    }
}

#[test]
fn plan_expands_steps_for_every_point() {
    let steps = vec![Step::comment("set vset"),
                     Step::write("psu", "VOLT vset"),
                     Step::query("dmm", "MEAS:CURR?", "current")];
    let sweep = Sweep::new([("vset", vec![0.5, 1.0]), ("unused", vec![1.0, 2.0])]);
    let plan = SweepPlan::new(steps, sweep, permutation(&[])).unwrap();

    assert_eq!(plan.len().unwrap(), 4);
    assert_eq!(plan.used_variables(), vec!["vset"]);
    assert_eq!(plan.outputs(), vec!["current"]);

    let iterations = plan.iterations().unwrap();
    assert_eq!(iterations.len(), 4);
    assert_eq!(iterations[2],
               vec![Action::Comment("set vset".to_string()),
                    Action::Write { instrument: "psu".to_string(),
                                    command:    "VOLT 1".to_string(), },
                    Action::Query { instrument: "dmm".to_string(),
                                    command:    "MEAS:CURR?".to_string(),
                                    output:     "current".to_string(), }]);
    assert_eq!(iterations[2][1].to_string(), "psu.write(VOLT 1)");
    assert_eq!(iterations[2][2].to_string(), "current = dmm.query(MEAS:CURR?)");
}

#[test]
fn plan_rejects_bad_priority_up_front() {
    let sweep = Sweep::new([("v", vec![1.0])]);
    let err = SweepPlan::new(vec![Step::write("psu", "VOLT v")], sweep, permutation(&["w"])).unwrap_err();

    assert_eq!(err, SweepError::UnknownVariable { name: "w".to_string() });
}
