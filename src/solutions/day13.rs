use std::cmp::Ordering;
use std::slice;
use std::str::FromStr;

use anyhow::{bail, ensure, Context, Result};

use crate::parse_u32_from_bytes;

#[derive(Debug, Clone)]
enum Packet {
    Integer(u32),
    List(Vec<Packet>),
}

impl Ord for Packet {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Packet::Integer(a), Packet::Integer(b)) => a.cmp(b),
            (Packet::List(a), Packet::List(b)) => a.cmp(b),
            (Packet::Integer(_), Packet::List(b)) => slice::from_ref(self).cmp(b.as_slice()),
            (Packet::List(a), Packet::Integer(_)) => a.as_slice().cmp(slice::from_ref(other)),
        }
    }
}

impl PartialOrd for Packet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Packet {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Packet {}

struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    fn packet(&mut self) -> Result<Packet> {
        match self.peek() {
            Some(b'[') => {
                self.pos += 1;
                let mut items = Vec::new();
                if self.peek() == Some(b']') {
                    self.pos += 1;
                    return Ok(Packet::List(items));
                }
                loop {
                    items.push(self.packet()?);
                    match self.bump() {
                        Some(b',') => {}
                        Some(b']') => return Ok(Packet::List(items)),
                        other => bail!(
                            "expected ',' or ']' at {}, found {:?}",
                            self.pos,
                            other.map(char::from)
                        ),
                    }
                }
            }
            Some(b'0'..=b'9') => {
                let start = self.pos;
                while self.peek().is_some_and(|b| b.is_ascii_digit()) {
                    self.pos += 1;
                }
                let value = parse_u32_from_bytes(&self.bytes[start..self.pos]);
                Ok(Packet::Integer(u32::try_from(value)?))
            }
            other => bail!(
                "expected a packet at {}, found {:?}",
                self.pos,
                other.map(char::from)
            ),
        }
    }
}

impl FromStr for Packet {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parser = Parser {
            bytes: s.as_bytes(),
            pos: 0,
        };
        let packet = parser
            .packet()
            .with_context(|| format!("invalid packet {:?}", s))?;
        ensure!(parser.pos == s.len(), "trailing characters in packet {:?}", s);
        Ok(packet)
    }
}

pub fn day13(input: &str) -> Result<(usize, usize)> {
    let mut packets = Vec::new();
    let mut ordered_pairs = 0;

    for (i, pair) in input
        .split("\n\n")
        .filter(|pair| !pair.trim().is_empty())
        .enumerate()
    {
        let mut lines = pair.lines();
        let (Some(left), Some(right), None) = (lines.next(), lines.next(), lines.next()) else {
            bail!("pair {} does not hold exactly two packets", i + 1);
        };
        let left: Packet = left.parse()?;
        let right: Packet = right.parse()?;
        if left < right {
            ordered_pairs += i + 1;
        }
        packets.extend([left, right]);
    }

    let dividers: [Packet; 2] = ["[[2]]".parse()?, "[[6]]".parse()?];
    packets.extend(dividers.iter().cloned());
    packets.sort();

    let mut decoder_key = 1;
    for divider in &dividers {
        let position = packets
            .iter()
            .position(|packet| packet == divider)
            .context("divider packet missing after sorting")?;
        decoder_key *= position + 1;
    }

    Ok((ordered_pairs, decoder_key))
}
