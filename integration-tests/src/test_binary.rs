use std::{error::Error, fs::File, io::Write, path::Path};

fn write_args(workdir: &Path) -> std::io::Result<()> {
    let mut file = File::create(workdir.join("args"))?;
    for arg in std::env::args().skip(1) {
        file.write_all(arg.as_bytes())?;
        file.write_all(b"\n")?;
    }
    Ok(())
}

fn play_back(workdir: &Path, name: &str, mut sink: impl Write) -> std::io::Result<()> {
    let mut file = File::open(workdir.join(name))?;
    std::io::copy(&mut file, &mut sink)?;
    Ok(())
}

fn get_exit_status(workdir: &Path) -> Result<i32, Box<dyn Error>> {
    let exit_status = std::fs::read_to_string(workdir.join("exit-status"))?
        .trim()
        .parse()?;
    Ok(exit_status)
}

pub fn test_binary_main() {
    let workdir = std::env::current_exe()
        .unwrap()
        .parent()
        .unwrap()
        .to_owned();
    let _ = write_args(&workdir);
    let _ = play_back(&workdir, "stdout", std::io::stdout());
    let _ = play_back(&workdir, "stderr", std::io::stderr());

    let exit_status = get_exit_status(&workdir).unwrap_or(0);
    std::process::exit(exit_status);
}
