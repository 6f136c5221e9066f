mod render;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use skillet_core::completion::OpenAiClient;
use skillet_core::image::PexelsClient;
use skillet_core::recents::RecentRecipes;
use skillet_core::storage::FileStateStore;
use skillet_core::store::{RecipeStore, RestRecipeStore};
use skillet_core::types::{
    CUISINE_TYPES, DIETARY_RESTRICTIONS, Difficulty, GenerationRequest, RecipeId, SavedRecipeId,
    UserId,
};
use skillet_core::{Config, RecipeGenerator};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "skillet")]
#[command(about = "Generate recipes from the ingredients you have", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a batch of recipes from a list of ingredients
    #[command(after_help = catalog_help())]
    Generate {
        /// Comma-separated ingredients, e.g. "chicken,rice"
        #[arg(long, value_delimiter = ',', required = true)]
        ingredients: Vec<String>,
        /// Preferred cuisine; "Any" means no preference
        #[arg(long)]
        cuisine: Option<String>,
        /// Comma-separated dietary restrictions, e.g. "Vegan,Nut-Free"
        #[arg(long, value_delimiter = ',')]
        dietary: Vec<String>,
        /// Target total cooking time in minutes
        #[arg(long)]
        time: Option<u32>,
        /// Servings per recipe
        #[arg(long)]
        servings: Option<u32>,
        /// easy, medium, or hard
        #[arg(long, default_value = "medium")]
        difficulty: Difficulty,
    },
    /// Work with recently generated recipes
    Recents {
        #[command(subcommand)]
        command: RecentsCommands,
    },
    /// Work with recipes saved to your account
    Saved {
        #[command(subcommand)]
        command: SavedCommands,
    },
}

#[derive(Subcommand)]
enum RecentsCommands {
    /// List recent recipes, newest first
    List,
    /// Print one recent recipe in full
    Show { recipe_id: String },
    /// Drop one recipe from the recency cache
    Remove { recipe_id: String },
    /// Empty the recency cache
    Clear,
}

#[derive(Subcommand)]
enum SavedCommands {
    /// List saved recipes, newest first
    List {
        #[arg(long)]
        user: String,
    },
    /// Save a recently generated recipe
    Add {
        /// Id of a recipe currently in the recency cache
        recipe_id: String,
        #[arg(long)]
        user: String,
    },
    /// Delete one saved recipe by its saved id
    Remove { saved_id: String },
    /// Delete every recipe saved by the user
    Clear {
        #[arg(long)]
        user: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = Config::from_env().context("configuration error")?;

    match cli.command {
        Commands::Generate {
            ingredients,
            cuisine,
            dietary,
            time,
            servings,
            difficulty,
        } => {
            let request = GenerationRequest {
                ingredients,
                cuisine,
                dietary_restrictions: dietary,
                cooking_time: time,
                servings,
                difficulty,
            };
            generate(&config, &request).await?;
        }
        Commands::Recents { command } => run_recents(&config, command)?,
        Commands::Saved { command } => run_saved(&config, command).await?,
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn catalog_help() -> String {
    format!(
        "Cuisines: {}\nDietary restrictions: {}",
        CUISINE_TYPES.join(", "),
        DIETARY_RESTRICTIONS.join(", ")
    )
}

fn recents_cache(config: &Config) -> RecentRecipes {
    RecentRecipes::new(Box::new(FileStateStore::new(config.state_dir.clone())))
}

async fn generate(config: &Config, request: &GenerationRequest) -> Result<()> {
    let completion =
        OpenAiClient::from_config(config).context("failed to build completion client")?;
    let photos = PexelsClient::from_config(config).context("failed to build photo client")?;
    let generator = RecipeGenerator::new(
        Box::new(completion),
        Box::new(photos),
        recents_cache(config),
    );

    let recipes = generator.generate(request).await?;

    let recents = recents_cache(config);
    println!("Generated {} recipes:\n", recipes.len());
    for recipe in &recipes {
        recents.stash(recipe);
        render::recipe_card(recipe);
    }
    Ok(())
}

fn run_recents(config: &Config, command: RecentsCommands) -> Result<()> {
    let recents = recents_cache(config);
    match command {
        RecentsCommands::List => {
            let recipes = recents.get_all();
            if recipes.is_empty() {
                println!("No recent recipes.");
            } else {
                for recipe in &recipes {
                    render::recipe_row(recipe);
                }
            }
        }
        RecentsCommands::Show { recipe_id } => {
            let id = RecipeId::new(recipe_id);
            let recipe = recents
                .get_all()
                .into_iter()
                .find(|recipe| recipe.id == id)
                .or_else(|| recents.take(&id))
                .ok_or_else(|| anyhow!("no recent recipe with id {id}"))?;
            render::recipe_card(&recipe);
        }
        RecentsCommands::Remove { recipe_id } => {
            recents.remove(&RecipeId::new(recipe_id));
            println!("Removed.");
        }
        RecentsCommands::Clear => {
            recents.clear();
            println!("Recent recipes cleared.");
        }
    }
    Ok(())
}

async fn run_saved(config: &Config, command: SavedCommands) -> Result<()> {
    let store = RestRecipeStore::from_config(config).context("failed to build recipe store")?;
    match command {
        SavedCommands::List { user } => {
            let saved = store.list_by_user(&UserId::new(user)).await?;
            if saved.is_empty() {
                println!("No saved recipes.");
            } else {
                for row in &saved {
                    render::saved_row(row);
                }
            }
        }
        SavedCommands::Add { recipe_id, user } => {
            let id = RecipeId::new(recipe_id);
            let recipe = recents_cache(config)
                .get_all()
                .into_iter()
                .find(|recipe| recipe.id == id)
                .ok_or_else(|| anyhow!("no recent recipe with id {id}, generate it first"))?;
            let saved = store.save(&UserId::new(user), &recipe).await?;
            println!("Saved \"{}\" as {}.", saved.recipe.title, saved.id);
        }
        SavedCommands::Remove { saved_id } => {
            store.delete_one(&SavedRecipeId::new(saved_id)).await?;
            println!("Deleted.");
        }
        SavedCommands::Clear { user } => {
            store.delete_all_by_user(&UserId::new(user)).await?;
            println!("Saved recipes cleared.");
        }
    }
    Ok(())
}
