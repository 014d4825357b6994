use crate::{parse_args, Workdir};
use futures::prelude::*;
use stratus_core::{
    config::{destination, sync},
    transfer::{Config, Event, Options, Transfer},
};

fn transfer_for(workdir: &Workdir) -> Transfer {
    Transfer::new(Config {
        cp_binary: workdir.bin(),
        rsync_binary: workdir.bin(),
    })
}

fn source(path: &str, strategy: sync::Strategy) -> sync::Source {
    sync::Source {
        path: sync::Path(path.to_owned()),
        strategy,
        ..Default::default()
    }
}

#[tokio::test]
async fn should_run_copy_source_with_recursive_arguments() {
    let workdir = Workdir::new().unwrap();
    let transfer = transfer_for(&workdir);

    transfer
        .transfer(
            &source("/home/user/.config", sync::Strategy::Copy),
            &destination::Path("/mnt/backup".to_owned()),
            false,
            &Options::default(),
        )
        .unwrap()
        .wait()
        .await
        .unwrap();

    parse_args(workdir.path()).unwrap().assert_args(&[
        "-r",
        "/home/user/.config",
        "/mnt/backup/",
    ]);
}

#[tokio::test]
async fn should_run_copy_source_with_extra_args() {
    let workdir = Workdir::new().unwrap();
    let transfer = transfer_for(&workdir);

    transfer
        .transfer(
            &sync::Source {
                path: sync::Path("/home/user/.config".to_owned()),
                strategy: sync::Strategy::Copy,
                extra_args: vec!["--preserve=all".to_owned()],
                ..Default::default()
            },
            &destination::Path("/mnt/backup".to_owned()),
            false,
            &Options::default(),
        )
        .unwrap()
        .wait()
        .await
        .unwrap();

    parse_args(workdir.path()).unwrap().assert_args(&[
        "-r",
        "--preserve=all",
        "/home/user/.config",
        "/mnt/backup/",
    ]);
}

#[tokio::test]
async fn should_run_mirror_source_with_archive_and_progress_arguments() {
    let workdir = Workdir::new().unwrap();
    let transfer = transfer_for(&workdir);

    transfer
        .transfer(
            &source("/home/user/docs", sync::Strategy::Mirror),
            &destination::Path("/mnt/backup".to_owned()),
            false,
            &Options::default(),
        )
        .unwrap()
        .wait()
        .await
        .unwrap();

    parse_args(workdir.path()).unwrap().assert_args(&[
        "-ah",
        "--progress",
        "/home/user/docs/",
        "/mnt/backup/",
    ]);
}

#[tokio::test]
async fn should_run_mirror_source_with_excludes_deletion_and_extra_args() {
    let workdir = Workdir::new().unwrap();
    let transfer = transfer_for(&workdir);

    transfer
        .transfer(
            &sync::Source {
                path: sync::Path("/home/user/.librewolf".to_owned()),
                strategy: sync::Strategy::Mirror,
                excludes: vec![
                    sync::Exclude("cache2".to_owned()),
                    sync::Exclude("startupCache".to_owned()),
                ],
                extra_args: vec!["--checksum".to_owned()],
            },
            &destination::Path("/mnt/backup".to_owned()),
            true,
            &Options::default(),
        )
        .unwrap()
        .wait()
        .await
        .unwrap();

    parse_args(workdir.path()).unwrap().assert_args(&[
        "-ah",
        "--progress",
        "--exclude",
        "cache2",
        "--exclude",
        "startupCache",
        "--delete",
        "--checksum",
        "/home/user/.librewolf/",
        "/mnt/backup/",
    ]);
}

#[tokio::test]
async fn check_wait_should_return_error_if_process_exits_with_unsuccessful_status_code() {
    let workdir = Workdir::new().unwrap().with_exit_status(1).unwrap();
    let transfer = transfer_for(&workdir);

    let result = transfer
        .run(sync::Strategy::Copy, &[] as &[&str], &Options::default())
        .unwrap()
        .check_wait()
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn should_capture_stdout_and_stderr() {
    let workdir = Workdir::new()
        .unwrap()
        .with_stdout("stdout1\nstdout2\nstdout3")
        .unwrap()
        .with_stderr("stderr1\nstderr2\nstderr3\n")
        .unwrap();
    let transfer = transfer_for(&workdir);

    let mut process = transfer
        .run(
            sync::Strategy::Mirror,
            &[] as &[&str],
            &Options::capture_output(),
        )
        .unwrap();

    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    while let Some(event) = process.next().await {
        match event.unwrap() {
            Event::StdoutLine(line) => stdout.push(line),
            Event::StderrLine(line) => stderr.push(line),
        }
    }
    assert_eq!(&stdout, &["stdout1", "stdout2", "stdout3"]);
    assert_eq!(&stderr, &["stderr1", "stderr2", "stderr3"]);
}

#[tokio::test]
async fn should_get_version_string() {
    let workdir = Workdir::new()
        .unwrap()
        .with_stdout(b"  rsync  version 3.2.7  protocol version 31  \nother line\n\n")
        .unwrap();
    let transfer = transfer_for(&workdir);

    let version_string = transfer
        .version_string(sync::Strategy::Mirror)
        .await
        .unwrap();

    assert_eq!(&version_string, "rsync  version 3.2.7  protocol version 31");
    parse_args(workdir.path()).unwrap().assert_args(&["--version"]);
}

#[tokio::test]
async fn should_fail_to_get_version_from_whitespace_output() {
    let workdir = Workdir::new()
        .unwrap()
        .with_stdout(b"   \n\t\n")
        .unwrap();
    let transfer = transfer_for(&workdir);

    let result = transfer.version_string(sync::Strategy::Copy).await;

    assert!(result.is_err());
}
