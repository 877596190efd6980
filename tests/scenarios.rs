//! End-to-end traces for small hand-checked workloads.

use srtf_sim::sim::parse_workload;
use srtf_sim::{JobSpec, Sim, SimConfig, SimError, SrtfScheduler};

mod common;

#[test]
fn single_atomic_job_single_cpu() {
    common::setup_test();
    let report = common::simulate(vec![JobSpec::atomic(0, 1, 5)], 1, false);

    assert_eq!(
        common::trace(&report),
        vec![
            "0,RUNNING,pid=1,remaining_time=5,cpu=0",
            "5,FINISHED,pid=1,proc_remaining=0",
        ]
    );
    assert_eq!(report.summary.makespan, 5);
    assert_eq!(
        report.summary.to_string(),
        "Turnaround time 5\nTime overhead 1.00 1.00\nMakespan 5\n"
    );
}

#[test]
fn simultaneous_atomic_jobs_spread_across_cpus() {
    common::setup_test();
    let jobs = vec![JobSpec::atomic(0, 1, 3), JobSpec::atomic(0, 2, 5)];
    let report = common::simulate(jobs, 2, false);

    assert_eq!(
        common::trace(&report),
        vec![
            "0,RUNNING,pid=1,remaining_time=3,cpu=0",
            "0,RUNNING,pid=2,remaining_time=5,cpu=1",
            "3,FINISHED,pid=1,proc_remaining=1",
            "5,FINISHED,pid=2,proc_remaining=0",
        ]
    );
    assert_eq!(report.summary.makespan, 5);
}

#[test]
fn splittable_job_finishes_with_last_child() {
    common::setup_test();
    let report = common::simulate(vec![JobSpec::splittable(0, 1, 4)], 2, false);

    assert_eq!(
        common::trace(&report),
        vec![
            "0,RUNNING,pid=1.0,remaining_time=3,cpu=0",
            "0,RUNNING,pid=1.1,remaining_time=3,cpu=1",
            "3,FINISHED,pid=1,proc_remaining=0",
        ]
    );
    let stats = report.stats[0];
    assert_eq!(stats.arrival_time, 0);
    assert_eq!(stats.execution_time, 4);
    assert_eq!(stats.turnaround_time, 3);
    assert_eq!(
        report.summary.to_string(),
        "Turnaround time 3\nTime overhead 0.75 0.75\nMakespan 3\n"
    );
}

#[test]
fn shorter_arrival_preempts_and_preempted_job_resumes() {
    common::setup_test();
    let jobs = vec![JobSpec::atomic(0, 1, 6), JobSpec::atomic(2, 2, 2)];
    let report = common::simulate(jobs, 1, false);

    assert_eq!(
        common::trace(&report),
        vec![
            "0,RUNNING,pid=1,remaining_time=6,cpu=0",
            "2,RUNNING,pid=2,remaining_time=2,cpu=0",
            "4,FINISHED,pid=2,proc_remaining=1",
            "4,RUNNING,pid=1,remaining_time=4,cpu=0",
            "8,FINISHED,pid=1,proc_remaining=0",
        ]
    );
    assert_eq!(
        report.summary.to_string(),
        "Turnaround time 5\nTime overhead 1.33 1.17\nMakespan 8\n"
    );
}

#[test]
fn successor_tied_with_finished_job_is_announced_a_tick_later() {
    common::setup_test();
    let jobs = vec![JobSpec::atomic(0, 1, 3), JobSpec::atomic(1, 2, 3)];
    let report = common::simulate(jobs, 1, false);

    // Job 2 takes over at tick 3 with the same 3 ticks job 1 was announced
    // with, so it only shows up once its remaining time has moved
    assert_eq!(
        common::trace(&report),
        vec![
            "0,RUNNING,pid=1,remaining_time=3,cpu=0",
            "3,FINISHED,pid=1,proc_remaining=1",
            "4,RUNNING,pid=2,remaining_time=2,cpu=0",
            "6,FINISHED,pid=2,proc_remaining=0",
        ]
    );
    assert_eq!(
        report.summary.to_string(),
        "Turnaround time 4\nTime overhead 1.67 1.33\nMakespan 6\n"
    );
}

#[test]
fn child_shares_cpu_with_atomic_job() {
    common::setup_test();
    let jobs = vec![JobSpec::atomic(0, 1, 4), JobSpec::splittable(1, 2, 4)];
    let report = common::simulate(jobs, 2, false);

    assert_eq!(
        common::trace(&report),
        vec![
            "0,RUNNING,pid=1,remaining_time=4,cpu=0",
            "1,RUNNING,pid=2.0,remaining_time=3,cpu=1",
            "4,FINISHED,pid=1,proc_remaining=1",
            "4,RUNNING,pid=2.1,remaining_time=3,cpu=0",
            "7,FINISHED,pid=2,proc_remaining=0",
        ]
    );
    assert_eq!(
        report.summary.to_string(),
        "Turnaround time 5\nTime overhead 1.50 1.25\nMakespan 7\n"
    );
}

#[test]
fn simultaneous_batch_runs_shortest_first() {
    common::setup_test();
    let jobs = vec![JobSpec::atomic(0, 1, 5), JobSpec::atomic(0, 2, 2)];
    let report = common::simulate(jobs, 1, false);

    assert_eq!(
        common::trace(&report),
        vec![
            "0,RUNNING,pid=2,remaining_time=2,cpu=0",
            "2,FINISHED,pid=2,proc_remaining=1",
            "2,RUNNING,pid=1,remaining_time=5,cpu=0",
            "7,FINISHED,pid=1,proc_remaining=0",
        ]
    );
}

#[test]
fn heavy_first_moves_long_jobs_to_early_arrivals() {
    common::setup_test();
    let jobs = vec![
        JobSpec::atomic(0, 1, 2),
        JobSpec::atomic(0, 2, 3),
        JobSpec::atomic(5, 3, 9),
    ];
    let report = common::simulate(jobs, 1, true);

    assert_eq!(
        common::trace(&report),
        vec![
            "0,RUNNING,pid=2,remaining_time=3,cpu=0",
            "3,FINISHED,pid=2,proc_remaining=1",
            "3,RUNNING,pid=3,remaining_time=9,cpu=0",
            "5,RUNNING,pid=1,remaining_time=2,cpu=0",
            "7,FINISHED,pid=1,proc_remaining=1",
            "7,RUNNING,pid=3,remaining_time=7,cpu=0",
            "14,FINISHED,pid=3,proc_remaining=0",
        ]
    );
    assert_eq!(report.summary.makespan, 14);
}

#[test]
fn idle_gap_before_first_arrival() {
    common::setup_test();
    let report = common::simulate(vec![JobSpec::atomic(3, 1, 2)], 1, false);

    assert_eq!(
        common::trace(&report),
        vec![
            "3,RUNNING,pid=1,remaining_time=2,cpu=0",
            "5,FINISHED,pid=1,proc_remaining=0",
        ]
    );
    assert_eq!(report.stats[0].turnaround_time, 2);
    assert_eq!(report.summary.makespan, 5);
}

#[test]
fn empty_workload_finishes_immediately() {
    let report = common::simulate(Vec::new(), 3, false);
    assert!(report.events.is_empty());
    assert_eq!(report.summary.makespan, 0);
}

#[test]
fn workload_text_to_output() {
    common::setup_test();
    let jobs = parse_workload("0 1 3 n\n0 2 5 n\n").unwrap();
    let report = common::simulate(jobs, 2, false);

    let mut out = Vec::new();
    report.write_trace(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap() + &report.summary.to_string();
    assert_eq!(
        text,
        "0,RUNNING,pid=1,remaining_time=3,cpu=0\n\
         0,RUNNING,pid=2,remaining_time=5,cpu=1\n\
         3,FINISHED,pid=1,proc_remaining=1\n\
         5,FINISHED,pid=2,proc_remaining=0\n\
         Turnaround time 4\n\
         Time overhead 1.00 1.00\n\
         Makespan 5\n"
    );
}

#[test]
fn rejects_duplicate_ids_and_zero_processors() {
    let config = SimConfig::new(1, false).unwrap();
    let jobs = vec![JobSpec::atomic(0, 1, 2), JobSpec::atomic(1, 1, 2)];
    assert!(matches!(
        Sim::<SrtfScheduler>::new(jobs, &config),
        Err(SimError::DuplicateJob(1))
    ));

    let config = SimConfig {
        processors: 0,
        heavy_first: false,
    };
    assert!(matches!(
        Sim::<SrtfScheduler>::new(Vec::new(), &config),
        Err(SimError::Config(_))
    ));
}
