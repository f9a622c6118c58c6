use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    signal-sandbox completions bash > ~/.bash_completion.d/signal-sandbox\n\n\
                  Generate zsh completions:\n    signal-sandbox completions zsh > ~/.zfunc/_signal-sandbox\n\n\
                  Generate fish completions:\n    signal-sandbox completions fish > ~/.config/fish/completions/signal-sandbox.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
