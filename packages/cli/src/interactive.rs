//! Terminal exploration of a running session.

use dialoguer::{Input, Select};
use tract_map_view::{
    EventOutcome, HighlightResolution, InteractionEvent, MapConfig, SceneRecorder, ScreenPoint,
    Session,
};

type SceneSession<'a> = Session<&'a mut SceneRecorder>;

enum Action {
    ChangeAttribute,
    InspectTract,
    InspectBar,
    Done,
}

impl Action {
    const ALL: &[Self] = &[
        Self::ChangeAttribute,
        Self::InspectTract,
        Self::InspectBar,
        Self::Done,
    ];

    const fn label(&self) -> &'static str {
        match self {
            Self::ChangeAttribute => "Change attribute",
            Self::InspectTract => "Inspect a tract",
            Self::InspectBar => "Inspect a histogram bar",
            Self::Done => "Done",
        }
    }
}

/// Runs the attribute selector and hover inspection loop until the user
/// is done.
///
/// # Errors
///
/// * If a prompt fails
pub fn run(
    session: &mut SceneSession<'_>,
    config: &MapConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let pointer = ScreenPoint::new(config.frame.width / 2.0, config.frame.height / 2.0);
    let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();

    loop {
        println!();
        println!("Showing: {}", session.selection().active_attribute().title);

        let idx = Select::new()
            .with_prompt("What would you like to do?")
            .items(&labels)
            .default(0)
            .interact()?;

        match Action::ALL[idx] {
            Action::ChangeAttribute => change_attribute(session)?,
            Action::InspectTract => inspect_tract(session, pointer)?,
            Action::InspectBar => inspect_bar(session, pointer)?,
            Action::Done => return Ok(()),
        }
    }
}

fn change_attribute(session: &mut SceneSession<'_>) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = session.catalog();
    let titles = catalog.display_names();
    let current = catalog
        .index_of(&session.selection().active_attribute().name)
        .unwrap_or(0);

    let idx = Select::new()
        .with_prompt("Attribute")
        .items(&titles)
        .default(current)
        .interact()?;

    let Some(name) = catalog.names().nth(idx).map(str::to_string) else {
        return Ok(());
    };
    session.handle(InteractionEvent::SelectAttribute { name })?;

    let binning = session.selection().binning();
    println!(
        "{} tracts binned into {} bars",
        binning.total_members(),
        binning.len()
    );
    Ok(())
}

fn inspect_tract(
    session: &mut SceneSession<'_>,
    pointer: ScreenPoint,
) -> Result<(), Box<dyn std::error::Error>> {
    let tract_id: String = Input::new().with_prompt("Tract id").interact_text()?;
    let tract_id = tract_id.trim().to_string();

    let outcome = session.handle(InteractionEvent::RegionHover {
        tract_id: tract_id.clone(),
        pointer,
    })?;
    report(session, &outcome);
    session.handle(InteractionEvent::RegionUnhover { tract_id })?;
    Ok(())
}

fn inspect_bar(
    session: &mut SceneSession<'_>,
    pointer: ScreenPoint,
) -> Result<(), Box<dyn std::error::Error>> {
    let attribute = session.selection().active_attribute();
    let bars: Vec<String> = session
        .selection()
        .binning()
        .bins()
        .iter()
        .map(|bin| {
            format!(
                "{} ({})",
                attribute.value_kind.format_range(bin.lower_bound, bin.upper_bound),
                bin.count()
            )
        })
        .collect();
    if bars.is_empty() {
        println!("No tracts have a value for {}", attribute.title);
        return Ok(());
    }

    let index = Select::new()
        .with_prompt("Bar")
        .items(&bars)
        .default(0)
        .interact()?;

    let outcome = session.handle(InteractionEvent::BarHover { index, pointer })?;
    report(session, &outcome);
    session.handle(InteractionEvent::BarUnhover { index })?;
    Ok(())
}

fn report(session: &SceneSession<'_>, outcome: &EventOutcome) {
    let EventOutcome::Highlighted(HighlightResolution { regions, bar, .. }) = outcome else {
        println!("Nothing to highlight");
        return;
    };

    if let Some(label) = session.surface().label() {
        println!("{}: {} ({})", label.title, label.text, label.detail);
    }
    match bar {
        Some(index) => println!("Linked bar: {index}"),
        None => println!("Linked bar: none"),
    }
    println!("Highlighted tracts ({}): {}", regions.len(), regions.join(", "));
}
