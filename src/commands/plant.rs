use clap::{Subcommand, ValueEnum};
use serde_json::json;
use std::io::{self, Write};

use plantcat::client::{self, Notification, Outcome, Session, StoreClient};
use plantcat::models::{Field, PlantForm};

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum PlantSubcommand {
    /// List plants in catalog order
    List {
        /// Only show rows with a cell containing this text
        #[arg(long, short)]
        search: Option<String>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show the zone filter options
    Zones,

    /// Select a plant and show it as loaded into the edit form
    Show {
        /// Row number as shown by `list`
        row: usize,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Add a new plant
    Add {
        #[command(flatten)]
        fields: FormArgs,
    },

    /// Update an existing plant
    Update {
        /// Row number as shown by `list`
        row: usize,

        #[command(flatten)]
        fields: FormArgs,
    },

    /// Delete a plant
    Delete {
        /// Row number as shown by `list`
        row: usize,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },

    /// Remove plants that repeat an earlier common/botanical name pair
    Dedupe,
}

/// Edit form fields. Omitted fields are left empty (add) or unchanged (update).
#[derive(clap::Args, Default)]
pub struct FormArgs {
    /// Common name
    #[arg(long)]
    common: Option<String>,

    /// Botanical name
    #[arg(long)]
    botanical: Option<String>,

    /// Hardiness zone
    #[arg(long)]
    zone: Option<String>,

    /// Light requirements (Full Sun, Partial Sun, Partial Shade, Full Shade)
    #[arg(long)]
    light: Option<String>,

    /// Price, e.g. 12.50
    #[arg(long)]
    price: Option<String>,

    /// Availability
    #[arg(long)]
    availability: Option<String>,
}

impl FormArgs {
    fn values(&self) -> [(Field, Option<&String>); 6] {
        [
            (Field::Common, self.common.as_ref()),
            (Field::Botanical, self.botanical.as_ref()),
            (Field::Zone, self.zone.as_ref()),
            (Field::Light, self.light.as_ref()),
            (Field::Price, self.price.as_ref()),
            (Field::Availability, self.availability.as_ref()),
        ]
    }

    fn is_empty(&self) -> bool {
        self.values().iter().all(|(_, value)| value.is_none())
    }

    /// Writes the provided values over `form`.
    fn apply(&self, form: &mut PlantForm) {
        for (field, value) in self.values() {
            if let Some(value) = value {
                form.set(field, value);
            }
        }
    }
}

/// Converts a 1-based row number to a collection index.
fn row_index(row: usize) -> Result<usize, Box<dyn std::error::Error>> {
    row.checked_sub(1)
        .ok_or_else(|| "Row numbers start at 1".into())
}

async fn open_session(client: &StoreClient) -> Result<Session, Box<dyn std::error::Error>> {
    let plants = client.load().await?;
    Ok(Session::new(plants))
}

/// Saves after a mutation and reports the outcome. A failed save is shown
/// but does not fail the command.
async fn finish(client: &StoreClient, session: &Session, outcome: Outcome) {
    if outcome.persist {
        if let Some(failure) = client::persist(client, session.plants()).await {
            eprintln!("{}", failure);
        }
    }
    println!("{}", outcome.notification);
}

impl PlantSubcommand {
    pub async fn run(&self, client: &StoreClient) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            PlantSubcommand::List { search, format } => {
                let mut session = open_session(client).await?;
                if let Some(term) = search {
                    session.filter(term);
                }

                let visible: Vec<_> = session
                    .table()
                    .visible_rows()
                    .map(|row| &session.plants()[row.index])
                    .collect();

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&visible)?);
                    }
                    OutputFormat::Text => {
                        if visible.is_empty() {
                            println!("No plants found");
                            return Ok(());
                        }
                        print!("{}", session.table());
                        println!(
                            "\nShowing {} of {} plant(s)",
                            visible.len(),
                            session.plants().len()
                        );
                    }
                }
                Ok(())
            }

            PlantSubcommand::Zones => {
                let session = open_session(client).await?;
                print!("{}", session.zones());
                Ok(())
            }

            PlantSubcommand::Show { row, format } => {
                let index = row_index(*row)?;
                let mut session = open_session(client).await?;
                let light = session.select(index)?;
                let plant = &session.plants()[index];
                let form = session.form();

                match format {
                    OutputFormat::Json => {
                        let value = json!({
                            "row": row,
                            "id": plant.id,
                            "form": form,
                            "custom_light_option": light.custom_label(),
                        });
                        println!("{}", serde_json::to_string_pretty(&value)?);
                    }
                    OutputFormat::Text => {
                        println!("Row {} (id {})", row, plant.id);
                        println!("{}", "-".repeat(32));
                        for field in Field::ALL {
                            println!("{:<20} {}", format!("{}:", field), form.get(field));
                        }
                        if let Some(label) = light.custom_label() {
                            println!("\nLight options: {}", session.lights().labels().join(", "));
                            println!("Using custom option: {}", label);
                        }
                        if form.light != plant.light {
                            println!("\nStored light value: {}", plant.light);
                        }
                        println!("\n{}", Notification::info("Plant selected for editing"));
                    }
                }
                Ok(())
            }

            PlantSubcommand::Add { fields } => {
                let mut session = open_session(client).await?;
                let mut form = PlantForm::default();
                fields.apply(&mut form);

                let outcome = session.add(&form)?;
                finish(client, &session, outcome).await;
                Ok(())
            }

            PlantSubcommand::Update { row, fields } => {
                if fields.is_empty() {
                    return Err("Nothing to update. Provide at least one option.".into());
                }

                let index = row_index(*row)?;
                let mut session = open_session(client).await?;
                session.select(index)?;

                let mut form = session.form().clone();
                fields.apply(&mut form);

                let outcome = session.update(&form)?;
                finish(client, &session, outcome).await;
                Ok(())
            }

            PlantSubcommand::Delete { row, force } => {
                let index = row_index(*row)?;
                let mut session = open_session(client).await?;
                session.select(index)?;

                // Confirm deletion unless --force is used
                let confirmed = if *force {
                    true
                } else {
                    let plant = &session.plants()[index];
                    println!("{}\n", plant);
                    print!("Are you sure you want to delete \"{}\"? [y/N] ", plant.common);
                    io::stdout().flush()?;

                    let mut input = String::new();
                    io::stdin().read_line(&mut input)?;
                    input.trim().eq_ignore_ascii_case("y")
                };

                let outcome = session.delete(|_| confirmed)?;
                finish(client, &session, outcome).await;
                Ok(())
            }

            PlantSubcommand::Dedupe => {
                let mut session = open_session(client).await?;
                let outcome = session.deduplicate();
                finish(client, &session, outcome).await;
                Ok(())
            }
        }
    }
}
