//! The `quimikey` CLI: attach to the device and track selections, look up a
//! single element, or list serial ports.

use clap::Parser;
use quimikey::{
    args::{
        CommandTask::{Listen, Lookup, Ports},
        ListenCommand, LookupCommand, QuimikeyArgs,
    },
    config::Config,
    elements::{ElementDirectory, ElementRecord},
    gui::device_selector,
    listener::ElementListener,
    query::ElementQuery,
    selection::CurrentSelection,
};

use log::{error, info};
use serial2::SerialPort;
use std::{
    path::PathBuf,
    process::exit,
    sync::Arc,
    thread::sleep,
    time::Duration,
};

fn main() {
    env_logger::init();
    let args = QuimikeyArgs::parse();

    let config = match Config::load_or_create(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!("could not load {}: {}", args.config.display(), e);
            exit(1);
        }
    };

    match args.command {
        Listen(cmd) => listen(config, cmd),
        Lookup(cmd) => lookup(config, cmd),
        Ports => ports(),
    }
}

fn load_directory(path: &PathBuf) -> Arc<ElementDirectory> {
    match ElementDirectory::load(path) {
        Ok(directory) => Arc::new(directory),
        Err(e) => {
            error!("could not load element data from {}: {}", path.display(), e);
            exit(1);
        }
    }
}

fn listen(config: Config, cmd: ListenCommand) {
    let mut config = config;
    let explicit_device = cmd.device.is_some();
    if let Some(device) = cmd.device {
        config.serial_port = device.to_string_lossy().into_owned();
    }
    if let Some(baudrate) = cmd.baudrate {
        config.baudrate = baudrate;
    }
    if let Some(elements) = cmd.elements {
        config.elements_path = elements;
    }

    if let Err(e) = config.validate() {
        error!("{}", e);
        exit(1);
    }

    let directory = load_directory(&config.elements_path);

    // With auto-start off, the operator picks the port interactively unless
    // one was named on the command line.
    let device = if explicit_device || config.auto_start_serial {
        PathBuf::from(&config.serial_port)
    } else {
        let picked = device_selector(|| SerialPort::available_ports().unwrap_or_default())
            .expect("terminal failure in the device selector");
        match picked {
            Some(device) => device,
            None => {
                info!("no device selected, exiting");
                return;
            }
        }
    };

    let mut port = match SerialPort::open(&device, config.baudrate) {
        Ok(port) => port,
        Err(e) => {
            error!("could not open {}: {}", device.display(), e);
            exit(1);
        }
    };
    // Frames arrive whenever a key is pressed, which can be hours apart, so
    // the read timeout is effectively forever.
    if let Err(e) = port.set_read_timeout(Duration::MAX) {
        error!("could not configure {}: {}", device.display(), e);
        exit(1);
    }

    info!(
        "listening on {} at {} baud, {} elements loaded",
        device.display(),
        config.baudrate,
        directory.records().len()
    );

    let selection = CurrentSelection::new();
    let listener = ElementListener::spawn(port, directory.clone(), selection.clone());
    let query = ElementQuery::new(directory, selection);

    // A connection loss ends the listener thread (reported there, once) but
    // not this loop: the last selection stays available to consumers.
    let mut shown: Option<String> = None;
    loop {
        if let Some(record) = query.current() {
            if shown.as_deref() != Some(record.symbol.as_str()) {
                info!("now showing {} ({})", record.name, record.symbol);
                println!("{}", format_record(record));
                shown = Some(record.symbol.clone());
            }
        }
        if listener.is_finished() {
            sleep(Duration::from_secs(1));
        } else {
            sleep(Duration::from_millis(50));
        }
    }
}

fn lookup(config: Config, cmd: LookupCommand) {
    let elements_path = cmd.elements.unwrap_or(config.elements_path);
    let directory = load_directory(&elements_path);

    match directory.find(&cmd.identifier) {
        Some(record) => println!("{}", format_record(record)),
        None => {
            eprintln!("no element matches {:?}", cmd.identifier);
            exit(1);
        }
    }
}

fn ports() {
    match SerialPort::available_ports() {
        Ok(ports) if ports.is_empty() => println!("no serial devices found"),
        Ok(ports) => {
            for port in ports {
                println!("{}", port.to_string_lossy());
            }
        }
        Err(e) => {
            error!("could not enumerate serial ports: {}", e);
            exit(1);
        }
    }
}

fn format_record(record: &ElementRecord) -> String {
    let mut out = format!(
        "{} ({})\n  atomic number  {}\n  atomic mass    {}\n  category       {}\n  phase          {}",
        record.name,
        record.symbol,
        record.atomic_number,
        record.atomic_mass,
        record.category,
        record.phase,
    );
    if let Some(ref url) = record.model_3d {
        out.push_str(&format!("\n  3D model       {}", url));
    }
    if let Some(ref url) = record.image_2d {
        out.push_str(&format!("\n  2D image       {}", url));
    }
    out
}
