use clap::Parser;
use std::process::{Child, ExitCode};
use tracing::{debug, error, info, warn};
mod config;
mod error;
mod layout;
mod mappings;
mod request;
mod services;
mod utils;

use config::Config;
use error::{Result, SbsError};
use request::ComparisonRequest;
use services::{
    build_launch_specs,
    create_window_controller,
    geometry,
    lifecycle,
    ReadinessWaiter,
    Shutdown,
};

#[derive(Parser, Debug)]
#[command(name = "sidebyside")]
#[command(about = "Показывает два видео бок о бок в двух окнах ffplay")]
struct Args {
    /// Путь к файлу конфигурации
    #[arg(long, default_value = "sidebyside.toml")]
    config: String,

    /// Режим сухого запуска (плееры не запускаются, окна эмулируются)
    #[arg(long)]
    dry_run: bool,

    /// Уровень логирования (перекрывает logging.level)
    #[arg(long)]
    log_level: Option<String>,

    /// <video1> <video2|-same> [-grey | -sepia | -contrast V | -gamma V | аргументы ffplay...]
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    videos: Vec<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match Config::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Ошибка конфигурации: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    // Инициализация системы логирования
    let level = args.log_level.as_deref().unwrap_or(&config.logging.level);
    if let Err(e) = init_tracing(level, &config.logging.format) {
        eprintln!("Не удалось инициализировать логирование: {:#}", e);
        return ExitCode::FAILURE;
    }

    info!("Запуск sidebyside v{}", env!("CARGO_PKG_VERSION"));
    info!("Конфигурация загружена из: {}", args.config);

    if args.dry_run {
        warn!("Режим сухого запуска - плееры не запускаются");
    }

    match run(&args, &config).await {
        Ok(()) => {
            info!("sidebyside завершил работу");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            report(&e);
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(args: &Args, config: &Config) -> Result<()> {
    let request = ComparisonRequest::interpret(&args.videos)?;
    if request.is_same_source() {
        info!("Сравнение {:?} с самим собой", request.video1);
    }
    if !request.filters.is_empty() {
        info!("Фильтры второго окна: {}", request.filters);
    }
    utils::check_prerequisites(config, args.dry_run)?;

    let display = geometry::display_size(&config.layout)?;
    let video = geometry::probe_video_size(&config.player.probe_command, &request.video1)?;
    let layout = layout::compute_layout(display, video, &config.layout)?;
    info!("Окна: слева {}, справа {}", layout.left, layout.right);

    let controller = create_window_controller(config, args.dry_run).await?;
    let waiter = ReadinessWaiter::new(
        controller.as_ref(),
        config.ready_poll_interval(),
        config.ready_timeout(),
    );

    let (first, second) = build_launch_specs(&config.player.command, &request, &layout);
    let mut children = Vec::new();
    let mut handles = Vec::new();

    // Второй плеер запускается только после того, как первое окно стало активным
    for spec in [&first, &second] {
        println!("\n{}", spec);
        if !args.dry_run {
            children.push(spec.spawn()?);
        }
        handles.push(waiter.wait_for(&spec.title).await?);
    }

    match lifecycle::watch(controller.as_ref(), &handles, config.lifecycle_poll_interval()).await {
        Shutdown::AllClosed => info!("Оба окна закрыты"),
        Shutdown::Interrupted => info!("Сравнение прервано пользователем"),
    }

    reap(&mut children);
    Ok(())
}

/// Забрать статусы завершившихся плееров, не дожидаясь остальных
fn reap(children: &mut [Child]) {
    for child in children.iter_mut() {
        match child.try_wait() {
            Ok(Some(status)) => debug!("Плеер pid {} завершился: {}", child.id(), status),
            Ok(None) => debug!("Плеер pid {} ещё работает", child.id()),
            Err(e) => warn!("Не удалось получить статус плеера pid {}: {}", child.id(), e),
        }
    }
}

/// Короткое сообщение для пользователя
fn report(err: &SbsError) {
    match err {
        SbsError::Usage(_) => eprintln!("{}", request::usage_text()),
        SbsError::Expired(_) => eprintln!("expired"),
        SbsError::ToolNotFound(_) => eprintln!("{}\n\n{}", err, utils::install_hint()),
        _ => eprintln!("{}", err),
    }
}

fn init_tracing(level: &str, format: &str) -> anyhow::Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))?;

    let registry = tracing_subscriber::registry().with(filter);

    // stdout остаётся для командных строк плееров
    match format {
        "json" => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        _ => registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .init(),
    }

    Ok(())
}
