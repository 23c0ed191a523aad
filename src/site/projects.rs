use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Interior,
    Graphic,
}

/// One portfolio entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: &'static str,
    pub title: &'static str,
    pub category: Category,
    pub description: &'static str,
    pub image_url: &'static str,
    pub year: &'static str,
}

const fn project(
    id: &'static str,
    title: &'static str,
    category: Category,
    description: &'static str,
    image_url: &'static str,
    year: &'static str,
) -> Project {
    Project {
        id,
        title,
        category,
        description,
        image_url,
        year,
    }
}

pub const INTERIOR_PROJECTS: [Project; 6] = [
    project("1", "The Obsidian Loft", Category::Interior, "Modern industrial living space.", "https://picsum.photos/600/800?random=10", "2023"),
    project("2", "Azure Villa", Category::Interior, "Coastal minimalist retreat.", "https://picsum.photos/600/600?random=11", "2022"),
    project("3", "Kyoto Tea House", Category::Interior, "Traditional aesthetics meets modern utility.", "https://picsum.photos/600/900?random=12", "2023"),
    project("4", "Urban Sanctuary", Category::Interior, "Small space optimization.", "https://picsum.photos/600/700?random=13", "2021"),
    project("5", "Velvet Lounge", Category::Interior, "Commercial bar design.", "https://picsum.photos/600/800?random=14", "2024"),
    project("6", "Nordic Office", Category::Interior, "Productivity focused workspace.", "https://picsum.photos/600/600?random=15", "2023"),
];

pub const GRAPHIC_PROJECTS: [Project; 4] = [
    project("101", "Neon Syntax", Category::Graphic, "Brand Identity", "https://picsum.photos/800/600?random=20", "2023"),
    project("102", "Abstract Flow", Category::Graphic, "Poster Series", "https://picsum.photos/800/800?random=21", "2022"),
    project("103", "Mono Type", Category::Graphic, "Typography Study", "https://picsum.photos/800/600?random=22", "2023"),
    project("104", "Eco Roots", Category::Graphic, "Packaging Design", "https://picsum.photos/800/1000?random=23", "2024"),
];

pub fn catalogue(category: Category) -> &'static [Project] {
    match category {
        Category::Interior => &INTERIOR_PROJECTS,
        Category::Graphic => &GRAPHIC_PROJECTS,
    }
}

/// Both catalogues, interior first
pub fn all_projects() -> impl Iterator<Item = &'static Project> {
    INTERIOR_PROJECTS.iter().chain(GRAPHIC_PROJECTS.iter())
}

pub fn find(id: &str) -> Option<&'static Project> {
    all_projects().find(|p| p.id == id)
}
