/*!

This is the long-form manual for `social_choice` and `rmcount`.

## Elections

An election is a list of alternatives, in a declared order, and a list of
ballots. Every ballot ranks all the alternatives, most preferred first, with no
ties and no omissions. [`crate::validate`] rejects anything else, and every
method runs on the [`crate::ValidElection`] it returns.

The declared order matters: it is the order of all the tallies in the results,
and it breaks ties for the top-two runoff and the Borda count.

## Methods

### Majority

Counts the first preferences (the plurality tally). An alternative wins if it
holds strictly more than half of the ballots: 3 of 5 is a majority, 2 of 4 is
not.

### Top-two runoff

The two alternatives with the most first preferences are kept. When counts are
equal, the alternative declared first goes through. Each ballot then supports
whichever finalist it ranks higher. An exact split has no winner.

### Condorcet

The pairwise matrix holds, for each ordered pair (a, b), the number of ballots
ranking a ahead of b. Since ballots are complete, the (a, b) and (b, a) entries
always add up to the number of ballots. The Condorcet winner beats every other
alternative strictly. There may be none (the Condorcet paradox):

|       | A>B | B>C | C>A |
|-------|-----|-----|-----|
| votes | 2-1 | 2-1 | 2-1 |

### Schulze

Each pairwise win becomes a link of strength equal to the winner's count. The
strength of a path is its weakest link, and the strength from a to b is the
strongest path from a to b. An alternative is a winner if, against every other
one, its strength is at least as large as the strength back. There is always at
least one winner. Several winners denote a tie, for example all three
alternatives of the paradox above.

A Condorcet winner is always the only Schulze winner.

### Instant-runoff (IRV)

Rounds of counting. Each ballot counts for its most preferred alternative still
running. An alternative with strictly more than half of the ballots wins.
Otherwise the alternative with the fewest votes is eliminated and its ballots
move to their next choice. When several alternatives share the fewest votes, the
one whose label sorts first alphabetically is eliminated (not the declared
order). The last alternative standing always wins, at the latest after one
round per alternative.

### Coombs

Same rounds and same majority check as IRV, but the alternative eliminated is
the one ranked last (among those still running) on the most ballots, with the
same alphabetical tie-break.

### Borda

With n alternatives, the alternative ranked at position p (0 is the top) gets
n - 1 - p points from the ballot. The highest total wins, and equal totals are
listed in declared order.

## Command line

`rmcount` reads an election, runs every method and prints a JSON summary.

```bash
rmcount -i election.json --out stdout
```

The native input is the JSON document below. `title` is optional.

```text
{
  "title": "Team lunch",
  "options": ["Pizza", "Sushi", "Tacos"],
  "voters": [
    {"ranking": ["Sushi", "Pizza", "Tacos"]},
    {"ranking": ["Tacos", "Sushi", "Pizza"]}
  ]
}
```

Ballots can also be read from CSV (`--input-type csv`) or Excel
(`--input-type xlsx`, with `--excel-worksheet-name`): one ballot per row after
a header row, the most preferred alternative in the first column.

```text
choice 1,choice 2,choice 3
Sushi,Pizza,Tacos
Tacos,Sushi,Pizza
```

The declared order of the alternatives comes from `--alternatives` (repeat the
flag for each one), or else from the order in which the labels first appear in
the ballots. Blank rows are skipped.

If the election is not valid, the summary contains an `error` object with a
`code` and a `message` instead of the results.

The `--reference` flag compares the summary with an expected one and prints the
differences.

 */
