//! Terminal rendering for recipes.

use skillet_core::image::fallback_image_url;
use skillet_core::store::SavedRecipe;
use skillet_core::types::Recipe;

/// Human cooking-time label: "45 min", "1 hr 30 min", "2 hr". Zero
/// reads as unknown.
pub fn format_cooking_time(minutes: u32) -> String {
    if minutes == 0 {
        return "N/A".to_string();
    }
    if minutes < 60 {
        return format!("{minutes} min");
    }
    let hours = minutes / 60;
    let mins = minutes % 60;
    if mins > 0 {
        format!("{hours} hr {mins} min")
    } else {
        format!("{hours} hr")
    }
}

fn format_servings(servings: u32) -> String {
    if servings == 0 {
        "N/A".to_string()
    } else {
        servings.to_string()
    }
}

pub fn recipe_card(recipe: &Recipe) {
    let title = if recipe.title.is_empty() {
        "Untitled recipe"
    } else {
        recipe.title.as_str()
    };
    println!("{title}");
    println!("{}", "=".repeat(title.chars().count()));
    if !recipe.description.is_empty() {
        println!("{}", recipe.description);
    }
    println!(
        "Time: {}  Serves: {}  Difficulty: {}  Cuisine: {}",
        format_cooking_time(recipe.cooking_time),
        format_servings(recipe.servings),
        recipe.difficulty,
        if recipe.cuisine.is_empty() {
            "-"
        } else {
            recipe.cuisine.as_str()
        },
    );
    let image = recipe
        .image_url
        .clone()
        .unwrap_or_else(|| fallback_image_url(&recipe.id).to_string());
    println!("Image: {image}");
    println!();
    println!("Ingredients:");
    for ingredient in &recipe.ingredients {
        println!("  - {ingredient}");
    }
    println!();
    println!("Instructions:");
    for (index, step) in recipe.instructions.iter().enumerate() {
        println!("  {}. {step}", index + 1);
    }
    if let Some(nutrition) = &recipe.nutrition {
        println!();
        println!(
            "Nutrition: {} kcal, {} protein, {} carbs, {} fat",
            nutrition.calories, nutrition.protein, nutrition.carbs, nutrition.fat
        );
    }
    println!();
    println!("Id: {}", recipe.id);
    println!();
}

pub fn recipe_row(recipe: &Recipe) {
    println!(
        "{}  {}  {}",
        recipe.id,
        recipe.created_at.format("%Y-%m-%d %H:%M"),
        if recipe.title.is_empty() {
            "Untitled recipe"
        } else {
            recipe.title.as_str()
        },
    );
}

pub fn saved_row(saved: &SavedRecipe) {
    println!(
        "{}  {}  {}",
        saved.id,
        saved.saved_at.format("%Y-%m-%d %H:%M"),
        if saved.recipe.title.is_empty() {
            "Untitled recipe"
        } else {
            saved.recipe.title.as_str()
        },
    );
}
