use dialoguer::Input;

use crate::client::VideoApi;
use crate::error::Result;

const LINE_SEPARATOR: &str = "__________________________________________________";

/// Interactive menu shell. Each cycle re-prints the catalog, then waits for
/// a selection. All rendering and input handling lives here; the client and
/// domain types never print.
pub struct App {
    api: VideoApi,
    key: Option<String>,
}

impl App {
    pub fn new(api: VideoApi, key: Option<String>) -> Self {
        Self { api, key }
    }

    pub fn run(&self) -> Result<()> {
        loop {
            if !self.print_videos()? {
                println!("Cannot retrieve data!");
                return Ok(());
            }
            self.print_menu();
            let choice: String = Input::new().with_prompt("Selection").interact_text()?;
            match choice.trim() {
                "1" => self.print_video()?,
                "2" if self.key.is_some() => {
                    if !self.print_own_videos()? {
                        println!("Cannot retrieve data!");
                        return Ok(());
                    }
                }
                "0" => {
                    println!("Quit...");
                    return Ok(());
                }
                _ => println!("Invalid selection!"),
            }
        }
    }

    fn print_menu(&self) {
        println!("Video API");
        println!("1: View more details");
        if self.key.is_some() {
            println!("2: My videos");
        }
        println!("0: Exit");
    }

    /// Catalog listing; returns false on the absence marker.
    fn print_videos(&self) -> Result<bool> {
        let Some(videos) = self.api.fetch_videos()? else {
            return Ok(false);
        };
        println!("{LINE_SEPARATOR}");
        println!("{:>3} {:<18} {:<10}", "#", "Title", "Category");
        for video in &videos {
            println!(
                "{:>3} {:<18} {:<10}",
                video.id(),
                video.title().as_str(),
                video.category().label()
            );
        }
        println!("{LINE_SEPARATOR}");
        Ok(true)
    }

    fn print_video(&self) -> Result<()> {
        let selected_id = self.read_index()?;
        if selected_id == 0 {
            println!("Cancelled!");
            return Ok(());
        }
        println!("{LINE_SEPARATOR}");
        match self.api.fetch_video(selected_id)? {
            None => println!("Video not found!"),
            Some(video) => {
                println!(
                    "{:>3} {:<10} {:<18} {:<30} {:<10} {:<10}",
                    "#", "Title", "Author", "Description", "Category", "Views"
                );
                println!(
                    "{:>3} {:<10} {:<18} {:<30} {:<10} {:<10}",
                    video.id(),
                    video.title().as_str(),
                    video.author_name(),
                    video.description().as_str(),
                    video.category().label(),
                    video.views().count()
                );
            }
        }
        println!("{LINE_SEPARATOR}");
        Ok(())
    }

    fn print_own_videos(&self) -> Result<bool> {
        let key = self.key.as_deref().unwrap_or_default();
        let Some(videos) = self.api.fetch_own_videos(key)? else {
            return Ok(false);
        };
        println!("{LINE_SEPARATOR}");
        println!(
            "{:>3} {:<18} {:<30} {:<10} {:<10}",
            "#", "Title", "Description", "Category", "Views"
        );
        for video in &videos {
            println!(
                "{:>3} {:<18} {:<30} {:<10} {:<10}",
                video.id(),
                video.title().as_str(),
                video.description().as_str(),
                video.category().label(),
                video.views().count()
            );
        }
        println!("{LINE_SEPARATOR}");
        Ok(true)
    }

    /// Malformed input never reaches the client; it is re-prompted here.
    fn read_index(&self) -> Result<u64> {
        loop {
            let line: String = Input::new()
                .with_prompt("Index (0 to cancel)")
                .interact_text()?;
            match line.trim().parse() {
                Ok(index) => return Ok(index),
                Err(e) => println!("{e}"),
            }
        }
    }
}
