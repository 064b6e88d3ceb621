//! Static portfolio content: about, projects, resume, contact, social, portfolio.

use termfolio_types::error::Result;
use termfolio_vfs::{ABOUT_FILE, PROJECTS_FILE, RESUME_FILE, Vfs};

use crate::context::Context;
use crate::interpreter::{Command, CommandOutput};

pub const EMAIL: &str = "aayushxidsu.11am@gmail.com";
pub const PORTFOLIO_URL: &str = "https://ayush11profile.netlify.app/";

/// Known profiles, in display order.
pub const SOCIAL_LINKS: [(&str, &str); 5] = [
    ("linkedin", "https://linkedin.com/in/ayushdas-11am"),
    ("github", "https://github.com/aayush-xid-su"),
    ("instagram", "https://instagram.com/aayush_xid_su"),
    ("twitter", "https://x.com/aayushxidsu"),
    ("codepen", "https://codepen.io/aayush_xid_su"),
];

/// Read `name` from `home/<home_user>`, resolved from the root.
fn home_document(vfs: &Vfs, home_user: &str, name: &str) -> CommandOutput {
    let path = format!("home/{home_user}/{name}");
    match vfs.lookup(&path).and_then(|id| vfs.read(id)) {
        Some(text) => CommandOutput::Preformatted(text),
        None => CommandOutput::text(format!("Error: File not found at {path}")),
    }
}

// ---------------------------------------------------------------------------
// about / projects / resume
// ---------------------------------------------------------------------------

struct DocumentCmd {
    name: &'static str,
    description: &'static str,
    file: &'static str,
}

impl Command for DocumentCmd {
    fn name(&self) -> &str {
        self.name
    }
    fn description(&self) -> &str {
        self.description
    }
    fn usage(&self) -> &str {
        self.name
    }
    fn category(&self) -> &str {
        "portfolio"
    }
    fn execute(&self, _args: &[&str], ctx: &mut Context<'_>) -> Result<CommandOutput> {
        Ok(home_document(ctx.vfs, &ctx.config.home_user, self.file))
    }
}

// ---------------------------------------------------------------------------
// contact
// ---------------------------------------------------------------------------

struct ContactCmd;
impl Command for ContactCmd {
    fn name(&self) -> &str {
        "contact"
    }
    fn description(&self) -> &str {
        "Display my contact information."
    }
    fn usage(&self) -> &str {
        "contact"
    }
    fn category(&self) -> &str {
        "portfolio"
    }
    fn execute(&self, _args: &[&str], _ctx: &mut Context<'_>) -> Result<CommandOutput> {
        let linkedin = SOCIAL_LINKS[0].1;
        Ok(CommandOutput::Text(format!(
            "You can reach me via:\n- Email: {EMAIL}\n- LinkedIn: {linkedin}"
        )))
    }
}

// ---------------------------------------------------------------------------
// social
// ---------------------------------------------------------------------------

struct SocialCmd;
impl Command for SocialCmd {
    fn name(&self) -> &str {
        "social"
    }
    fn description(&self) -> &str {
        "Display links to my social media profiles."
    }
    fn usage(&self) -> &str {
        "social [platform]"
    }
    fn category(&self) -> &str {
        "portfolio"
    }
    fn execute(&self, args: &[&str], _ctx: &mut Context<'_>) -> Result<CommandOutput> {
        let Some(platform) = args.first() else {
            let mut lines = vec!["Here are my Social media:".to_string()];
            lines.extend(SOCIAL_LINKS.iter().map(|(p, url)| format!("- {p}: {url}")));
            return Ok(CommandOutput::Text(lines.join("\n")));
        };
        let platform = platform.to_lowercase();
        match SOCIAL_LINKS.iter().find(|(p, _)| *p == platform) {
            Some((p, url)) => Ok(CommandOutput::Text(format!("{p}: {url}"))),
            None => {
                let available: Vec<&str> = SOCIAL_LINKS.iter().map(|(p, _)| *p).collect();
                Ok(CommandOutput::Text(format!(
                    "Unknown platform: {platform}. Available: {}",
                    available.join(", ")
                )))
            },
        }
    }
}

// ---------------------------------------------------------------------------
// portfolio
// ---------------------------------------------------------------------------

struct PortfolioCmd;
impl Command for PortfolioCmd {
    fn name(&self) -> &str {
        "portfolio"
    }
    fn description(&self) -> &str {
        "Show the address of my personal portfolio website."
    }
    fn usage(&self) -> &str {
        "portfolio"
    }
    fn category(&self) -> &str {
        "portfolio"
    }
    fn execute(&self, _args: &[&str], _ctx: &mut Context<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Text(format!("Portfolio: {PORTFOLIO_URL}")))
    }
}

/// Register the portfolio content commands.
pub fn register_portfolio_commands(reg: &mut crate::CommandRegistry) {
    reg.register(Box::new(DocumentCmd {
        name: "about",
        description: "Displays my biography, education, and skills.",
        file: ABOUT_FILE,
    }));
    reg.register(Box::new(DocumentCmd {
        name: "projects",
        description: "Showcase of my key projects.",
        file: PROJECTS_FILE,
    }));
    reg.register(Box::new(DocumentCmd {
        name: "resume",
        description: "Displays my resume.",
        file: RESUME_FILE,
    }));
    reg.register(Box::new(ContactCmd));
    reg.register(Box::new(SocialCmd));
    reg.register(Box::new(PortfolioCmd));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Harness;
    use termfolio_vfs::VfsBuilder;

    #[test]
    fn about_reads_home_document() {
        let mut h = Harness::new();
        match &h.run("about")[..] {
            [CommandOutput::Preformatted(text)] => assert!(text.contains("Digital Identity")),
            other => panic!("expected preformatted, got {other:?}"),
        }
    }

    #[test]
    fn projects_and_resume() {
        let mut h = Harness::new();
        assert!(h.text("projects").contains("Packet Sniffer"));
        assert!(h.text("resume").contains("SUMMARY"));
    }

    #[test]
    fn documents_ignore_cwd() {
        let mut h = Harness::new();
        h.run("cd /home");
        assert!(h.text("about").contains("Ayush Das"));
    }

    #[test]
    fn missing_document_reports_path() {
        let builder = VfsBuilder::new("/home/aayush").unwrap();
        let vfs = builder.build();
        assert_eq!(
            home_document(&vfs, "aayush", RESUME_FILE),
            CommandOutput::text("Error: File not found at home/aayush/resume.md")
        );
    }

    #[test]
    fn contact_lists_email() {
        let mut h = Harness::new();
        let text = h.text("contact");
        assert!(text.starts_with("You can reach me via:"));
        assert!(text.contains(EMAIL));
    }

    #[test]
    fn social_lists_all_platforms() {
        let mut h = Harness::new();
        let text = h.text("social");
        assert_eq!(text.lines().count(), 6);
        assert!(text.contains("- github: https://github.com/aayush-xid-su"));
    }

    #[test]
    fn social_single_platform() {
        let mut h = Harness::new();
        assert_eq!(h.text("social GitHub"), "github: https://github.com/aayush-xid-su");
    }

    #[test]
    fn social_unknown_platform() {
        let mut h = Harness::new();
        assert_eq!(
            h.text("social myspace"),
            "Unknown platform: myspace. Available: linkedin, github, instagram, twitter, codepen"
        );
    }

    #[test]
    fn portfolio_prints_url() {
        let mut h = Harness::new();
        assert_eq!(h.text("portfolio"), format!("Portfolio: {PORTFOLIO_URL}"));
    }
}
