//! Benchmarks for chat line decoding.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tmi_proto::ParsedMessage;

/// Server keepalive
const PING: &str = "PING :tmi.twitch.tv";

/// Chat message with a few tags
const PRIVMSG: &str = "@badges=broadcaster/1;color=#0000FF :ronni!ronni@ronni.tmi.twitch.tv PRIVMSG #ronni :Kappa Keepo Kappa";

/// Chat message with the full tag set Twitch sends
const HEAVY_PRIVMSG: &str = "@badge-info=;badges=turbo/1;client-nonce=459e3142897c7a22b7d275178f2259e0;color=#0D4200;display-name=ronni;emotes=25:0-4,12-16/1902:6-10;first-msg=0;flags=;id=b34ccfc7-4977-403a-8a94-33c6bac34fb8;mod=0;returning-chatter=0;room-id=1337;subscriber=0;tmi-sent-ts=1507246572675;turbo=1;user-id=1337;user-type=global_mod :ronni!ronni@ronni.tmi.twitch.tv PRIVMSG #ronni :Kappa Keepo Kappa";

/// Bot command
const BOT_COMMAND: &str = "@badges=;color=#0000FF :ronni!ronni@ronni.tmi.twitch.tv PRIVMSG #ronni :!dice 2d6";

/// Ignored numeric
const IGNORED: &str = ":tmi.twitch.tv 005 ronni :whatever";

fn benchmark_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("Message Parsing");

    for (name, raw) in [
        ("ping", PING),
        ("privmsg", PRIVMSG),
        ("heavy_privmsg", HEAVY_PRIVMSG),
        ("bot_command", BOT_COMMAND),
        ("ignored", IGNORED),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| {
                let msg = ParsedMessage::parse(black_box(raw)).unwrap();
                black_box(msg)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_parsing);
criterion_main!(benches);
